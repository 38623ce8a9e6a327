#[test]
fn cargo_toml_has_release_profile() {
    let cargo_toml = include_str!("../Cargo.toml");
    assert!(
        cargo_toml.contains("[profile.release]"),
        "Cargo.toml must have a [profile.release] section"
    );
    assert!(
        cargo_toml.contains("lto = true"),
        "Release profile must enable LTO"
    );
    assert!(
        cargo_toml.contains("strip = true"),
        "Release profile must strip symbols"
    );
}

#[test]
fn image_backend_has_no_default_features() {
    let cargo_toml = include_str!("../Cargo.toml");
    let image_line = cargo_toml
        .lines()
        .find(|l| l.starts_with("image ="))
        .expect("image dependency");
    assert!(image_line.contains("default-features = false"));
    for codec in ["jpeg", "png", "ico", "webp", "bmp"] {
        assert!(image_line.contains(codec), "missing image feature {codec}");
    }
}
