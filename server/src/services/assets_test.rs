use super::*;

fn config() -> AssetConfig {
    AssetConfig {
        cloud_name: "demo".into(),
        upload_preset: "unsigned".into(),
        api_key: Some("123".into()),
        api_secret: None,
        default_folder: "uploads".into(),
    }
}

#[test]
fn endpoints_include_cloud_name() {
    let host = CloudinaryHost::new(config()).unwrap();
    assert_eq!(host.endpoint("upload"), "https://api.cloudinary.com/v1_1/demo/image/upload");
    assert_eq!(host.endpoint("destroy"), "https://api.cloudinary.com/v1_1/demo/image/destroy");
}

#[test]
fn signature_sorts_params_and_appends_secret() {
    let a = sign(&[("timestamp", "1700000000"), ("public_id", "folder/img")], "s3cret");
    let b = sign(&[("public_id", "folder/img"), ("timestamp", "1700000000")], "s3cret");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);

    let expected = bytes_to_hex(&Sha256::digest(b"public_id=folder/img&timestamp=1700000000s3cret"));
    assert_eq!(a, expected);
}

#[test]
fn signature_skips_empty_values() {
    assert_eq!(
        sign(&[("public_id", "x"), ("folder", "")], "k"),
        sign(&[("public_id", "x")], "k")
    );
}

#[test]
fn missing_asset_counts_as_destroyed() {
    assert!(destroy_succeeded("ok"));
    assert!(destroy_succeeded("not found"));
    assert!(!destroy_succeeded("error"));
}
