//! The feature-toggle schema.
//!
//! The recipe's option table is a closed set, so it is modeled as a fixed
//! schema: a [`Library`] enum covering every feature library and an
//! [`Options`] struct holding one disabled-bit per library plus the handful
//! of unrelated toggles (`shared`, `header_only`, the two free-form string
//! options). Defaults derive mechanically from each toggle's declared
//! domain: first entry of an enumerated domain, empty string for free-form.

use crate::error::{Error, Result};
use crate::settings::Settings;

/// The feature libraries this recipe can build, in option-table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Library {
    Atomic,
    Chrono,
    Container,
    Context,
    Coroutine,
    Coroutine2,
    DateTime,
    Exception,
    Fiber,
    Filesystem,
    Graph,
    GraphParallel,
    Iostreams,
    Locale,
    Log,
    Math,
    Metaparse,
    Mpi,
    ProgramOptions,
    Python,
    Random,
    Regex,
    Serialization,
    Signals,
    System,
    Test,
    Thread,
    Timer,
    TypeErasure,
    Wave,
}

impl Library {
    /// Every library, in the order toggles are declared (and flags emitted).
    pub const ALL: [Library; 30] = [
        Library::Atomic,
        Library::Chrono,
        Library::Container,
        Library::Context,
        Library::Coroutine,
        Library::Coroutine2,
        Library::DateTime,
        Library::Exception,
        Library::Fiber,
        Library::Filesystem,
        Library::Graph,
        Library::GraphParallel,
        Library::Iostreams,
        Library::Locale,
        Library::Log,
        Library::Math,
        Library::Metaparse,
        Library::Mpi,
        Library::ProgramOptions,
        Library::Python,
        Library::Random,
        Library::Regex,
        Library::Serialization,
        Library::Signals,
        Library::System,
        Library::Test,
        Library::Thread,
        Library::Timer,
        Library::TypeErasure,
        Library::Wave,
    ];

    /// Name used by Boost.Build, i.e. the `<x>` in `--without-<x>`.
    ///
    /// An explicit mapping rather than string surgery on the toggle name, so
    /// adding a library is a compile error until both sides exist.
    pub fn flag_name(self) -> &'static str {
        match self {
            Library::Atomic => "atomic",
            Library::Chrono => "chrono",
            Library::Container => "container",
            Library::Context => "context",
            Library::Coroutine => "coroutine",
            Library::Coroutine2 => "coroutine2",
            Library::DateTime => "date_time",
            Library::Exception => "exception",
            Library::Fiber => "fiber",
            Library::Filesystem => "filesystem",
            Library::Graph => "graph",
            Library::GraphParallel => "graph_parallel",
            Library::Iostreams => "iostreams",
            Library::Locale => "locale",
            Library::Log => "log",
            Library::Math => "math",
            Library::Metaparse => "metaparse",
            Library::Mpi => "mpi",
            Library::ProgramOptions => "program_options",
            Library::Python => "python",
            Library::Random => "random",
            Library::Regex => "regex",
            Library::Serialization => "serialization",
            Library::Signals => "signals",
            Library::System => "system",
            Library::Test => "test",
            Library::Thread => "thread",
            Library::Timer => "timer",
            Library::TypeErasure => "type_erasure",
            Library::Wave => "wave",
        }
    }

    /// Toggle name as supplied by the caller (`without_<flag_name>`).
    pub fn toggle_name(self) -> String {
        format!("without_{}", self.flag_name())
    }

    /// Libraries whose toggle domain is `[True, False]`, i.e. disabled by
    /// default (they require extra toolchains to build).
    pub fn disabled_by_default(self) -> bool {
        matches!(self, Library::GraphParallel | Library::Mpi | Library::Python)
    }

    fn from_toggle_name(name: &str) -> Option<Library> {
        let flag = name.strip_prefix("without_")?;
        Library::ALL.iter().copied().find(|l| l.flag_name() == flag)
    }

    fn index(self) -> usize {
        Library::ALL.iter().position(|&l| l == self).unwrap()
    }
}

/// Declared toggle state for one configuration pass.
#[derive(Clone, Debug)]
pub struct Options {
    /// Build shared libraries. Domain `[True, False]`.
    pub shared: bool,
    /// Skip compilation entirely and publish headers only.
    pub header_only: bool,
    /// Semicolon-delimited preprocessor defines; `=` arrives percent-encoded
    /// as `%3D` because the caller's option syntax reserves `=`.
    pub cxxdefines: String,
    /// Semicolon-delimited extra compiler flags, encoded the same way.
    pub cxxflags: String,
    disabled: [bool; Library::ALL.len()],
}

impl Default for Options {
    fn default() -> Self {
        let mut disabled = [false; Library::ALL.len()];
        for lib in Library::ALL {
            disabled[lib.index()] = lib.disabled_by_default();
        }
        Self {
            shared: true,
            header_only: false,
            cxxdefines: String::new(),
            cxxflags: String::new(),
            disabled,
        }
    }
}

impl Options {
    pub fn is_disabled(&self, lib: Library) -> bool {
        self.disabled[lib.index()]
    }

    pub fn set_disabled(&mut self, lib: Library, disabled: bool) {
        self.disabled[lib.index()] = disabled;
    }

    /// Libraries not disabled, in option-table order.
    pub fn enabled_libraries(&self) -> Vec<Library> {
        Library::ALL
            .into_iter()
            .filter(|&l| !self.is_disabled(l))
            .collect()
    }

    /// Libraries disabled, in option-table order.
    pub fn disabled_libraries(&self) -> Vec<Library> {
        Library::ALL
            .into_iter()
            .filter(|&l| self.is_disabled(l))
            .collect()
    }

    /// Assign one toggle by its declared name, e.g. `without_python=True`.
    ///
    /// Names outside the fixed schema and values outside a toggle's domain
    /// are rejected; the toggle set cannot grow at runtime.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "shared" => self.shared = parse_bool(name, value)?,
            "header_only" => self.header_only = parse_bool(name, value)?,
            "cxxdefines" => self.cxxdefines = value.to_string(),
            "cxxflags" => self.cxxflags = value.to_string(),
            _ => match Library::from_toggle_name(name) {
                Some(lib) => self.set_disabled(lib, parse_bool(name, value)?),
                None => return Err(Error::unknown_option(name)),
            },
        }
        Ok(())
    }

    /// Second configuration step, once both settings and options have
    /// values.
    ///
    /// Boost DLLs cannot link the static MSVC runtime, so `MT`/`MTd` forces
    /// a static Boost build. Header-only builds never compile Python
    /// bindings, which require a locally discovered interpreter.
    pub fn normalize(&mut self, settings: &Settings) {
        if settings.is_msvc() && self.shared && settings.compiler.static_runtime() {
            self.shared = false;
        }
        if self.header_only {
            self.set_disabled(Library::Python, true);
        }
    }

    /// Toggles as flat key/value pairs for the identity fingerprint.
    pub fn fingerprint_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("shared".to_string(), py_bool(self.shared)),
            ("header_only".to_string(), py_bool(self.header_only)),
            ("cxxdefines".to_string(), self.cxxdefines.clone()),
            ("cxxflags".to_string(), self.cxxflags.clone()),
        ];
        for lib in Library::ALL {
            fields.push((lib.toggle_name(), py_bool(self.is_disabled(lib))));
        }
        fields
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        _ => Err(Error::invalid_option_value(name, value)),
    }
}

fn py_bool(value: bool) -> String {
    (if value { "True" } else { "False" }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Arch, BuildType, Compiler, MsvcRuntime, TargetOs};

    fn msvc_settings(runtime: MsvcRuntime) -> Settings {
        Settings {
            os: TargetOs::Windows,
            arch: Arch::X86_64,
            compiler: Compiler::VisualStudio {
                version: 14,
                runtime,
            },
            build_type: BuildType::Release,
        }
    }

    #[test]
    fn test_domain_derived_defaults() {
        let opts = Options::default();
        assert!(opts.shared);
        assert!(!opts.header_only);
        assert_eq!(opts.cxxdefines, "");
        assert_eq!(opts.cxxflags, "");

        // Only the toolchain-heavy libraries start disabled.
        assert_eq!(
            opts.disabled_libraries(),
            vec![Library::GraphParallel, Library::Mpi, Library::Python]
        );
        assert_eq!(opts.enabled_libraries().len(), 27);
    }

    #[test]
    fn test_set_by_toggle_name() {
        let mut opts = Options::default();
        opts.set("without_python", "False").unwrap();
        assert!(!opts.is_disabled(Library::Python));
        opts.set("without_date_time", "True").unwrap();
        assert!(opts.is_disabled(Library::DateTime));
        opts.set("shared", "False").unwrap();
        assert!(!opts.shared);
        opts.set("cxxdefines", "MACRO1;MACRO2%3D1").unwrap();
        assert_eq!(opts.cxxdefines, "MACRO1;MACRO2%3D1");
    }

    #[test]
    fn test_set_rejects_unknown_and_bad_values() {
        let mut opts = Options::default();
        assert!(matches!(
            opts.set("without_frobnicator", "True"),
            Err(Error::UnknownOption { .. })
        ));
        assert!(matches!(
            opts.set("shared", "Maybe"),
            Err(Error::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn test_normalize_static_runtime_forces_static_boost() {
        let mut opts = Options::default();
        opts.normalize(&msvc_settings(MsvcRuntime::Mt));
        assert!(!opts.shared);

        let mut opts = Options::default();
        opts.normalize(&msvc_settings(MsvcRuntime::Md));
        assert!(opts.shared);
    }

    #[test]
    fn test_normalize_header_only_disables_python() {
        let mut opts = Options::default();
        opts.set("without_python", "False").unwrap();
        opts.header_only = true;
        opts.normalize(&msvc_settings(MsvcRuntime::Md));
        assert!(opts.is_disabled(Library::Python));
    }
}
