//! Renders one `FieldDescriptor` as its control, label, and error line.
//!
//! SYSTEM CONTEXT
//! ==============
//! The entity form and the login form both render through this component.
//! Dispatch is a single exhaustive match on `Control`; values read from and
//! write to the shared `FormState` signal.

use leptos::prelude::*;
use serde_json::Value;

use crate::entity::field::{Control, FieldDescriptor, SelectOption};
use crate::state::form::FormState;
use crate::util::{datetime, markdown};

/// Browser `File` handles picked for image fields, keyed by field name.
///
/// Kept in local (non-`Send`) storage; `FormState` tracks only the names.
#[derive(Clone, Copy)]
pub struct PendingUploads {
    #[cfg(feature = "hydrate")]
    files: StoredValue<std::collections::HashMap<String, Vec<web_sys::File>>, LocalStorage>,
}

impl Default for PendingUploads {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingUploads {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "hydrate")]
            files: StoredValue::new_local(std::collections::HashMap::new()),
        }
    }

    /// Replace the files picked for `field`.
    #[cfg(feature = "hydrate")]
    pub fn set(&self, field: &str, files: Vec<web_sys::File>) {
        self.files.update_value(|map| {
            if files.is_empty() {
                map.remove(field);
            } else {
                map.insert(field.to_owned(), files);
            }
        });
    }

    /// Files picked for `field`, if any.
    #[cfg(feature = "hydrate")]
    pub fn get(&self, field: &str) -> Vec<web_sys::File> {
        self.files.with_value(|map| map.get(field).cloned().unwrap_or_default())
    }

    #[cfg(feature = "hydrate")]
    pub fn clear(&self) {
        self.files.update_value(std::collections::HashMap::clear);
    }
}

#[cfg(feature = "hydrate")]
fn file_list_to_vec(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Store picked files and mirror their names into the form state.
#[cfg(feature = "hydrate")]
fn attach(form: RwSignal<FormState>, uploads: PendingUploads, field: &str, files: Vec<web_sys::File>) {
    if form.with_untracked(|f| f.submitting) {
        return;
    }
    let images: Vec<web_sys::File> = files
        .into_iter()
        .filter(|f| f.type_().starts_with("image/"))
        .take(1)
        .collect();
    let names = images.iter().map(web_sys::File::name).collect();
    uploads.set(field, images);
    form.update(|f| f.attach_files(field, names));
}

#[component]
pub fn FormField(
    field: FieldDescriptor,
    form: RwSignal<FormState>,
    #[prop(optional)] uploads: Option<PendingUploads>,
) -> impl IntoView {
    let control = field.control();
    let name = StoredValue::new(field.name.clone());
    let read_only = field.read_only;
    let disabled = move || form.with(|f| f.locks_input(read_only));
    let placeholder = field.placeholder_text();
    let label = if field.is_required() {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    let text = move || form.with(|f| name.with_value(|n| f.text(n)));
    let set_text = move |value: String| form.update(|f| name.with_value(|n| f.set_value(n, Value::String(value))));
    let options = field.options.clone();

    let input = match control {
        Control::Input { input_type } => view! {
            <input
                class="form-field__input"
                id=field.name.clone()
                type=input_type
                placeholder=placeholder
                readonly=read_only
                disabled=disabled
                prop:value=text
                on:input=move |ev| set_text(event_target_value(&ev))
            />
        }
        .into_any(),
        Control::TextArea => view! {
            <textarea
                class="form-field__textarea"
                id=field.name.clone()
                rows="4"
                placeholder=placeholder
                disabled=disabled
                prop:value=text
                on:input=move |ev| set_text(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        Control::RichText => view! {
            <div class="form-field__rich-text">
                <textarea
                    class="form-field__textarea form-field__textarea--markdown"
                    id=field.name.clone()
                    rows="10"
                    placeholder=placeholder
                    disabled=disabled
                    prop:value=text
                    on:input=move |ev| set_text(event_target_value(&ev))
                ></textarea>
                <div class="form-field__preview" inner_html=move || markdown::to_html(&text())></div>
            </div>
        }
        .into_any(),
        Control::SingleChoice => view! {
            <div class="form-field__choices" role="radiogroup">
                {options
                    .into_iter()
                    .map(|SelectOption { label, value }| {
                        let checked_value = value.clone();
                        let attr_value = value.clone();
                        view! {
                            <label class="form-field__choice">
                                <input
                                    type="radio"
                                    name=name.get_value()
                                    value=attr_value
                                    disabled=disabled
                                    prop:checked=move || text() == checked_value
                                    on:change=move |_| set_text(value.clone())
                                />
                                <span>{label}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        Control::Dropdown => view! {
            <select
                class="form-field__select"
                id=field.name.clone()
                disabled=disabled
                on:change=move |ev| set_text(event_target_value(&ev))
            >
                <option value="" disabled=true selected=move || text().is_empty()>
                    {placeholder}
                </option>
                {options
                    .into_iter()
                    .map(|SelectOption { label, value }| {
                        let selected_value = value.clone();
                        view! {
                            <option value=value selected=move || text() == selected_value>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        Control::MultiDropdown => view! {
            <select
                class="form-field__select form-field__select--multi"
                id=field.name.clone()
                multiple=true
                disabled=disabled
                on:change=move |ev| {
                    #[cfg(feature = "hydrate")]
                    {
                        use wasm_bindgen::JsCast;
                        let Some(select) = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok()) else {
                            return;
                        };
                        let picked = select.selected_options();
                        let values = (0..picked.length())
                            .filter_map(|i| picked.item(i))
                            .filter_map(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
                            .map(|opt| opt.value())
                            .collect();
                        form.update(|f| name.with_value(|n| f.set_selected(n, values)));
                    }
                    #[cfg(not(feature = "hydrate"))]
                    let _ = ev;
                }
            >
                {options
                    .into_iter()
                    .map(|SelectOption { label, value }| {
                        let selected_value = value.clone();
                        view! {
                            <option
                                value=value
                                selected=move || form.with(|f| name.with_value(|n| f.is_selected(n, &selected_value)))
                            >
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        Control::CheckboxGroup => view! {
            <div class="form-field__choices form-field__choices--grid">
                {options
                    .into_iter()
                    .map(|SelectOption { label, value }| {
                        let checked_value = value.clone();
                        let attr_value = value.clone();
                        view! {
                            <label class="form-field__choice">
                                <input
                                    type="checkbox"
                                    value=attr_value
                                    disabled=disabled
                                    prop:checked=move || {
                                        form.with(|f| name.with_value(|n| f.is_selected(n, &checked_value)))
                                    }
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        form.update(|f| name.with_value(|n| f.toggle_option(n, &value, checked)));
                                    }
                                />
                                <span>{label}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        Control::ImageDrop => image_drop(field.name.clone(), form, uploads.unwrap_or_default(), disabled).into_any(),
        Control::DateTime => view! {
            <input
                class="form-field__input"
                id=field.name.clone()
                type="datetime-local"
                disabled=disabled
                prop:value=move || datetime::to_input_value(&text())
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    set_text(datetime::from_input_value(&raw).unwrap_or_default());
                }
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-field" class:form-field--invalid=move || form.with(|f| name.with_value(|n| f.error_for(n).is_some()))>
            <label class="form-field__label" for=field.name.clone()>
                {label}
            </label>
            {input}
            {move || {
                form.with(|f| name.with_value(|n| f.error_for(n).map(str::to_owned)))
                    .map(|message| view! { <p class="form-field__error">{message}</p> })
            }}
        </div>
    }
}

/// Drop zone with a file-picker fallback and a preview of the current image.
fn image_drop(
    field_name: String,
    form: RwSignal<FormState>,
    uploads: PendingUploads,
    disabled: impl Fn() -> bool + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let name = StoredValue::new(field_name.clone());
    let dragging_over = RwSignal::new(false);
    let current_url = move || form.with(|f| name.with_value(|n| f.text(n)));
    let pending = move || form.with(|f| name.with_value(|n| f.pending_for(n).join(", ")));
    #[cfg(not(feature = "hydrate"))]
    let _ = uploads;

    view! {
        <div
            class="form-field__dropzone"
            class:form-field__dropzone--active=move || dragging_over.get()
            class:form-field__dropzone--disabled=disabled
            on:dragover=move |ev| {
                ev.prevent_default();
                if disabled() {
                    return;
                }
                dragging_over.set(true);
            }
            on:dragleave=move |_| dragging_over.set(false)
            on:drop=move |ev| {
                ev.prevent_default();
                dragging_over.set(false);
                if disabled() {
                    return;
                }
                #[cfg(feature = "hydrate")]
                {
                    let files = file_list_to_vec(ev.data_transfer().and_then(|dt| dt.files()));
                    name.with_value(|n| attach(form, uploads, n, files));
                }
            }
        >
            <Show
                when=move || !pending().is_empty()
                fallback=move || {
                    let url = current_url();
                    if url.is_empty() {
                        view! { <p class="form-field__hint">"Drag an image here or choose a file"</p> }.into_any()
                    } else {
                        view! { <img class="form-field__preview-image" src=url alt="Current image"/> }.into_any()
                    }
                }
            >
                <p class="form-field__hint">{move || format!("Selected: {}", pending())}</p>
            </Show>
            <input
                class="form-field__file"
                id=field_name.clone()
                type="file"
                accept="image/*"
                disabled=disabled
                on:change=move |ev| {
                    #[cfg(feature = "hydrate")]
                    {
                        use wasm_bindgen::JsCast;
                        let files = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                            .map(|input| file_list_to_vec(input.files()))
                            .unwrap_or_default();
                        name.with_value(|n| attach(form, uploads, n, files));
                    }
                    #[cfg(not(feature = "hydrate"))]
                    let _ = ev;
                }
            />
        </div>
    }
}
