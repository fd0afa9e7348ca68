use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(PosterError::render("x").to_string().contains("render error:"));
    assert!(PosterError::encode("x").to_string().contains("encode error:"));
    assert!(
        PosterError::remote("x")
            .to_string()
            .contains("remote generation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
