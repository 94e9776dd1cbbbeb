//! Templates compiled into the binary.
//!
//! One template per artifact kind, keyed by the name returned from
//! `ArtifactKind::template()`. A `[templates] local_path` directory may
//! shadow any of them with a file of the same name.

/// `(name, source)` pairs for every built-in template.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "stencil.toml.j2",
        include_str!("../../templates/stencil.toml.j2"),
    ),
    (
        "base_dto.php.j2",
        include_str!("../../templates/base_dto.php.j2"),
    ),
    ("dto.php.j2", include_str!("../../templates/dto.php.j2")),
    (
        "request_dto.php.j2",
        include_str!("../../templates/request_dto.php.j2"),
    ),
    (
        "request.php.j2",
        include_str!("../../templates/request.php.j2"),
    ),
    (
        "resource.php.j2",
        include_str!("../../templates/resource.php.j2"),
    ),
    (
        "repository.php.j2",
        include_str!("../../templates/repository.php.j2"),
    ),
    (
        "service.php.j2",
        include_str!("../../templates/service.php.j2"),
    ),
    (
        "api_controller.php.j2",
        include_str!("../../templates/api_controller.php.j2"),
    ),
    (
        "web_controller.php.j2",
        include_str!("../../templates/web_controller.php.j2"),
    ),
];

/// Source of a built-in template by name.
pub fn builtin_source(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::ArtifactKind;

    #[test]
    fn every_artifact_kind_has_a_builtin_template() {
        for kind in ArtifactKind::ALL {
            assert!(
                builtin_source(kind.template()).is_some(),
                "no template for {kind:?}"
            );
        }
        assert_eq!(BUILTIN_TEMPLATES.len(), ArtifactKind::ALL.len());
    }
}
