//! Conditional dependency requirements derived from toggle state.

use crate::options::{Library, Options};
use crate::settings::{Settings, TargetOs};

pub const ZLIB_REFERENCE: &str = "zlib/1.2.8@lasote/stable";
pub const BZIP2_REFERENCE: &str = "bzip2/1.0.6@lasote/stable";

/// A transitive requirement this package declares to its orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyRequirement {
    /// Package reference, e.g. `zlib/1.2.8@lasote/stable`.
    pub reference: &'static str,
    /// Shared/static choice mirrored from this package's own toggle.
    pub shared: bool,
}

/// Requirements activated by the current toggle state, computed once per
/// configuration pass.
///
/// Header-only builds compile nothing, so they need no native dependencies
/// at all. Otherwise `iostreams` pulls in bzip2 on the platforms whose
/// system toolchains do not ship it for Boost (Linux, macOS) and zlib on
/// every platform, each mirroring this package's shared/static choice.
pub fn resolve_dependencies(options: &Options, settings: &Settings) -> Vec<DependencyRequirement> {
    if options.header_only {
        return Vec::new();
    }

    let mut requirements = Vec::new();
    if !options.is_disabled(Library::Iostreams) {
        match settings.os {
            TargetOs::Linux | TargetOs::Macos => requirements.push(DependencyRequirement {
                reference: BZIP2_REFERENCE,
                shared: options.shared,
            }),
            TargetOs::Windows => {}
        }
        requirements.push(DependencyRequirement {
            reference: ZLIB_REFERENCE,
            shared: options.shared,
        });
    }
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Arch, BuildType, Compiler};

    fn settings(os: TargetOs) -> Settings {
        Settings {
            os,
            arch: Arch::X86_64,
            compiler: Compiler::Gcc { libcxx: None },
            build_type: BuildType::Release,
        }
    }

    #[test]
    fn test_linux_iostreams_pulls_bzip2_and_zlib() {
        let opts = Options::default();
        let reqs = resolve_dependencies(&opts, &settings(TargetOs::Linux));
        assert_eq!(
            reqs.iter().map(|r| r.reference).collect::<Vec<_>>(),
            vec![BZIP2_REFERENCE, ZLIB_REFERENCE]
        );
        assert!(reqs.iter().all(|r| r.shared));
    }

    #[test]
    fn test_windows_skips_bzip2() {
        let opts = Options::default();
        let reqs = resolve_dependencies(&opts, &settings(TargetOs::Windows));
        assert_eq!(
            reqs.iter().map(|r| r.reference).collect::<Vec<_>>(),
            vec![ZLIB_REFERENCE]
        );
    }

    #[test]
    fn test_static_choice_propagates() {
        let mut opts = Options::default();
        opts.shared = false;
        let reqs = resolve_dependencies(&opts, &settings(TargetOs::Macos));
        assert!(reqs.iter().all(|r| !r.shared));
    }

    #[test]
    fn test_without_iostreams_needs_nothing() {
        let mut opts = Options::default();
        opts.set_disabled(Library::Iostreams, true);
        assert!(resolve_dependencies(&opts, &settings(TargetOs::Linux)).is_empty());
    }

    #[test]
    fn test_header_only_needs_nothing() {
        let mut opts = Options::default();
        opts.header_only = true;
        // Regardless of the compression toggle state.
        assert!(!opts.is_disabled(Library::Iostreams));
        assert!(resolve_dependencies(&opts, &settings(TargetOs::Linux)).is_empty());
    }
}
