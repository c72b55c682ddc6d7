//! Metadata published to consumers: preprocessor defines, resolved library
//! names, and the package identity fingerprint.

use crate::artifacts::{artifact_basenames, physical_filename};
use crate::deps::DependencyRequirement;
use crate::options::{Library, Options};
use crate::settings::Settings;

/// What the consuming build system needs to know about this package.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub defines: Vec<String>,
    pub libs: Vec<String>,
}

/// Consumer metadata for this configuration.
///
/// The define set tells consumers how to bind: dynamic-link marker vs
/// static-libs marker, the Python static-link marker when applicable, any
/// user-supplied defines (verbatim, exactly as the caller supplied them),
/// and on MSVC the marker that disables Boost's auto-linking so the
/// resolved library list below is the single source of truth.
pub fn package_metadata(settings: &Settings, options: &Options) -> PackageMetadata {
    let mut metadata = PackageMetadata::default();

    if !options.header_only && options.shared {
        metadata.defines.push("BOOST_ALL_DYN_LINK".to_string());
    } else {
        metadata.defines.push("BOOST_USE_STATIC_LIBS".to_string());
    }

    if options.header_only {
        return metadata;
    }

    if !options.is_disabled(Library::Python) && !options.shared {
        metadata.defines.push("BOOST_PYTHON_STATIC_LIB".to_string());
    }

    if !options.cxxdefines.is_empty() {
        metadata
            .defines
            .extend(options.cxxdefines.split(';').map(String::from));
    }

    metadata.libs = artifact_basenames(options, settings.os)
        .into_iter()
        .map(|name| physical_filename(name, settings, options.shared))
        .collect();

    if settings.is_msvc() {
        metadata.defines.push("BOOST_ALL_NO_LIB".to_string());
    }

    metadata
}

/// Identity fingerprint used by the orchestrator to address the published
/// package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageId {
    pub settings: Vec<(String, String)>,
    pub options: Vec<(String, String)>,
    pub requires: Vec<String>,
}

/// Compute the identity fingerprint.
///
/// A header-only package is identical across every compiler, platform and
/// toggle combination, so all of that state is erased and exactly one
/// variant is ever published.
pub fn package_id(
    settings: &Settings,
    options: &Options,
    requirements: &[DependencyRequirement],
) -> PackageId {
    if options.header_only {
        return PackageId {
            settings: Vec::new(),
            options: vec![("header_only".to_string(), "True".to_string())],
            requires: Vec::new(),
        };
    }

    PackageId {
        settings: settings.fingerprint_fields(),
        options: options.fingerprint_fields(),
        requires: requirements
            .iter()
            .map(|r| r.reference.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::resolve_dependencies;
    use crate::settings::{Arch, BuildType, Compiler, MsvcRuntime, TargetOs};

    fn gcc_linux() -> Settings {
        Settings {
            os: TargetOs::Linux,
            arch: Arch::X86_64,
            compiler: Compiler::Gcc { libcxx: None },
            build_type: BuildType::Release,
        }
    }

    fn msvc() -> Settings {
        Settings {
            os: TargetOs::Windows,
            arch: Arch::X86_64,
            compiler: Compiler::VisualStudio {
                version: 14,
                runtime: MsvcRuntime::Md,
            },
            build_type: BuildType::Release,
        }
    }

    #[test]
    fn test_link_mode_marker() {
        let meta = package_metadata(&gcc_linux(), &Options::default());
        assert_eq!(meta.defines[0], "BOOST_ALL_DYN_LINK");

        let mut opts = Options::default();
        opts.shared = false;
        let meta = package_metadata(&gcc_linux(), &opts);
        assert_eq!(meta.defines[0], "BOOST_USE_STATIC_LIBS");
    }

    #[test]
    fn test_header_only_publishes_defines_only() {
        let mut opts = Options::default();
        opts.header_only = true;
        let meta = package_metadata(&gcc_linux(), &opts);
        assert_eq!(meta.defines, vec!["BOOST_USE_STATIC_LIBS"]);
        assert!(meta.libs.is_empty());
    }

    #[test]
    fn test_python_static_marker() {
        let mut opts = Options::default();
        opts.shared = false;
        opts.set_disabled(Library::Python, false);
        let meta = package_metadata(&gcc_linux(), &opts);
        assert!(meta.defines.contains(&"BOOST_PYTHON_STATIC_LIB".to_string()));

        // Not emitted for shared builds.
        let mut opts = Options::default();
        opts.set_disabled(Library::Python, false);
        let meta = package_metadata(&gcc_linux(), &opts);
        assert!(!meta.defines.contains(&"BOOST_PYTHON_STATIC_LIB".to_string()));
    }

    #[test]
    fn test_user_defines_published_verbatim() {
        let mut opts = Options::default();
        opts.cxxdefines = "MACRO1;MACRO2%3D1".to_string();
        let meta = package_metadata(&gcc_linux(), &opts);
        assert!(meta.defines.contains(&"MACRO1".to_string()));
        assert!(meta.defines.contains(&"MACRO2%3D1".to_string()));
    }

    #[test]
    fn test_msvc_disables_auto_linking() {
        let meta = package_metadata(&msvc(), &Options::default());
        assert_eq!(meta.defines.last().unwrap(), "BOOST_ALL_NO_LIB");
        assert!(meta.libs.contains(&"boost_system-vc140-mt-1_63".to_string()));
    }

    #[test]
    fn test_plain_scheme_lib_names() {
        let meta = package_metadata(&gcc_linux(), &Options::default());
        assert!(meta.libs.contains(&"boost_system".to_string()));

        let mut opts = Options::default();
        opts.shared = false;
        let meta = package_metadata(&gcc_linux(), &opts);
        assert!(meta.libs.contains(&"libboost_system.a".to_string()));
    }

    #[test]
    fn test_header_only_identity_erasure() {
        let mut opts = Options::default();
        opts.header_only = true;
        let reqs = resolve_dependencies(&opts, &gcc_linux());
        let id = package_id(&gcc_linux(), &opts, &reqs);
        assert!(id.settings.is_empty());
        assert!(id.requires.is_empty());
        assert_eq!(
            id.options,
            vec![("header_only".to_string(), "True".to_string())]
        );
    }

    #[test]
    fn test_compiled_identity_keeps_everything() {
        let opts = Options::default();
        let reqs = resolve_dependencies(&opts, &gcc_linux());
        let id = package_id(&gcc_linux(), &opts, &reqs);
        assert!(id.settings.iter().any(|(k, _)| k == "compiler"));
        assert!(id.options.iter().any(|(k, _)| k == "without_python"));
        assert_eq!(id.requires.len(), 2);
    }
}
