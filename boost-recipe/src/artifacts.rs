//! Artifact naming: which physical libraries each feature produces, and the
//! exact filenames the packaging step must locate.
//!
//! Consumers resolve libraries by these strings, so [`physical_filename`]
//! must stay bit-exact across releases.

use crate::options::{Library, Options};
use crate::settings::{Compiler, Settings, TargetOs};
use crate::BOOST_VERSION;

/// Physical artifact base-names produced by one feature library.
///
/// Several features emit overlapping artifacts (`system` in particular is
/// emitted by many of them); the table is static data, with the two
/// platform-conditional additions kept as explicit overlay entries in
/// [`platform_extras`].
pub fn product_libs(lib: Library) -> &'static [&'static str] {
    match lib {
        Library::Atomic => &["atomic"],
        Library::Chrono => &["chrono", "system"],
        Library::Container => &["container"],
        Library::Context => &["context"],
        Library::Coroutine => &["chrono", "context", "coroutine", "system", "thread"],
        Library::Coroutine2 => &["context"],
        Library::DateTime => &["date_time"],
        Library::Exception => &["exception"],
        Library::Fiber => &["context", "fiber"],
        Library::Filesystem => &["filesystem", "system"],
        Library::Graph => &["graph", "regex"],
        Library::GraphParallel => &["graph_parallel", "mpi", "serialization"],
        Library::Iostreams => &["iostreams"],
        Library::Locale => &["locale", "system"],
        Library::Log => &[
            "atomic",
            "chrono",
            "date_time",
            "filesystem",
            "log",
            "log_setup",
            "regex",
            "system",
            "thread",
        ],
        Library::Math => &[
            "math_c99",
            "math_c99f",
            "math_c99l",
            "math_tr1",
            "math_tr1f",
            "math_tr1l",
        ],
        Library::Metaparse => &["chrono", "system", "timer", "unit_test_framework"],
        Library::Mpi => &["mpi", "serialization"],
        Library::ProgramOptions => &["program_options"],
        Library::Python => &["numpy", "python"],
        Library::Random => &["random", "system"],
        Library::Regex => &["regex"],
        Library::Serialization => &["serialization", "wserialization"],
        Library::Signals => &["signals"],
        Library::System => &["system"],
        Library::Test => &[
            "chrono",
            "prg_exec_monitor",
            "system",
            "test_exec_monitor",
            "timer",
            "unit_test_framework",
        ],
        Library::Thread => &["system", "thread"],
        Library::Timer => &["chrono", "system", "timer"],
        Library::TypeErasure => &["chrono", "system", "thread", "type_erasure"],
        Library::Wave => &["chrono", "date_time", "filesystem", "system", "thread", "wave"],
    }
}

/// Platform-conditional overlay entries on top of [`product_libs`].
pub fn platform_extras(lib: Library, os: TargetOs) -> &'static [&'static str] {
    match (lib, os) {
        (Library::Mpi, TargetOs::Macos) => &["mpi_python", "python"],
        (Library::Thread, TargetOs::Windows) => &["chrono"],
        _ => &[],
    }
}

/// Logical library names produced by the enabled feature set: the union of
/// every enabled feature's product list, deduplicated in first-seen order.
/// Monotone in the enabled set: enabling a feature never removes a name.
pub fn artifact_basenames(options: &Options, os: TargetOs) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for lib in options.enabled_libraries() {
        for name in product_libs(lib).iter().chain(platform_extras(lib, os)) {
            if !names.contains(name) {
                names.push(name);
            }
        }
    }
    names
}

/// The exact filename consumers link against, for one logical library name.
///
/// Two disjoint schemes, selected by compiler family:
///
/// - MSVC decorates the name with a toolset/threading/ABI/version suffix,
///   e.g. `boost_system-vc140-mt-1_63`, with a `lib` prefix for static
///   linkage (`exception` and `test_exec_monitor` are always `lib`-prefixed,
///   whatever the link mode).
/// - Every other compiler gets the plain form: `boost_<name>` shared,
///   `libboost_<name>.a` static.
pub fn physical_filename(logical: &str, settings: &Settings, shared: bool) -> String {
    match &settings.compiler {
        Compiler::VisualStudio { version, runtime } => {
            let visual_version = version * 10;
            let threading = "mt";

            let mut abi_tags = String::new();
            if runtime.is_static() {
                abi_tags.push('s');
            }
            if settings.build_type.is_debug() {
                abi_tags.push_str("gd");
            }
            let abi_tags = if abi_tags.is_empty() {
                String::new()
            } else {
                format!("-{abi_tags}")
            };

            let version = short_version();
            let suffix = format!("vc{visual_version}-{threading}{abi_tags}-{version}");

            if matches!(logical, "exception" | "test_exec_monitor") {
                format!("libboost_{logical}-{suffix}")
            } else {
                let prefix = if shared { "" } else { "lib" };
                format!("{prefix}boost_{logical}-{suffix}")
            }
        }
        _ => {
            if shared {
                format!("boost_{logical}")
            } else {
                format!("libboost_{logical}.a")
            }
        }
    }
}

/// Two-component version fragment used in Scheme A suffixes, `1_63`.
fn short_version() -> String {
    BOOST_VERSION
        .split('.')
        .take(2)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Arch, BuildType, MsvcRuntime};

    fn msvc(runtime: MsvcRuntime, build_type: BuildType) -> Settings {
        Settings {
            os: TargetOs::Windows,
            arch: Arch::X86_64,
            compiler: Compiler::VisualStudio {
                version: 14,
                runtime,
            },
            build_type,
        }
    }

    fn gcc() -> Settings {
        Settings {
            os: TargetOs::Linux,
            arch: Arch::X86_64,
            compiler: Compiler::Gcc { libcxx: None },
            build_type: BuildType::Release,
        }
    }

    #[test]
    fn test_plain_scheme_names() {
        assert_eq!(physical_filename("system", &gcc(), true), "boost_system");
        assert_eq!(
            physical_filename("system", &gcc(), false),
            "libboost_system.a"
        );
    }

    #[test]
    fn test_msvc_release_dynamic_runtime_suffix() {
        let settings = msvc(MsvcRuntime::Md, BuildType::Release);
        assert_eq!(
            physical_filename("system", &settings, true),
            "boost_system-vc140-mt-1_63"
        );
        assert_eq!(
            physical_filename("system", &settings, false),
            "libboost_system-vc140-mt-1_63"
        );
    }

    #[test]
    fn test_msvc_abi_tags() {
        let settings = msvc(MsvcRuntime::Mt, BuildType::Debug);
        assert_eq!(
            physical_filename("regex", &settings, false),
            "libboost_regex-vc140-mt-sgd-1_63"
        );

        let settings = msvc(MsvcRuntime::Md, BuildType::Debug);
        assert_eq!(
            physical_filename("regex", &settings, true),
            "boost_regex-vc140-mt-gd-1_63"
        );
    }

    #[test]
    fn test_msvc_always_lib_prefixed_names() {
        let settings = msvc(MsvcRuntime::Md, BuildType::Release);
        assert_eq!(
            physical_filename("exception", &settings, true),
            "libboost_exception-vc140-mt-1_63"
        );
        assert_eq!(
            physical_filename("test_exec_monitor", &settings, true),
            "libboost_test_exec_monitor-vc140-mt-1_63"
        );
    }

    #[test]
    fn test_basenames_union_deduplicates() {
        let mut opts = Options::default();
        for lib in Library::ALL {
            opts.set_disabled(lib, true);
        }
        opts.set_disabled(Library::Chrono, false);
        opts.set_disabled(Library::Timer, false);

        let names = artifact_basenames(&opts, TargetOs::Linux);
        assert_eq!(names, vec!["chrono", "system", "timer"]);
    }

    #[test]
    fn test_basenames_monotone_in_enabled_set() {
        let mut opts = Options::default();
        let before = artifact_basenames(&opts, TargetOs::Linux);

        opts.set_disabled(Library::Mpi, false);
        let after = artifact_basenames(&opts, TargetOs::Linux);
        for name in &before {
            assert!(after.contains(name), "enabling mpi removed {name}");
        }
        assert!(after.contains(&"mpi"));
    }

    #[test]
    fn test_platform_overlays() {
        let mut opts = Options::default();
        opts.set_disabled(Library::Mpi, false);

        let macos = artifact_basenames(&opts, TargetOs::Macos);
        assert!(macos.contains(&"mpi_python"));
        assert!(macos.contains(&"python"));

        let linux = artifact_basenames(&opts, TargetOs::Linux);
        assert!(!linux.contains(&"mpi_python"));

        // thread is enabled by default; Windows adds chrono through it even
        // when no chrono-producing feature is the cause.
        let mut opts = Options::default();
        for lib in Library::ALL {
            opts.set_disabled(lib, true);
        }
        opts.set_disabled(Library::Thread, false);
        assert_eq!(
            artifact_basenames(&opts, TargetOs::Windows),
            vec!["system", "thread", "chrono"]
        );
        assert_eq!(
            artifact_basenames(&opts, TargetOs::Linux),
            vec!["system", "thread"]
        );
    }
}
