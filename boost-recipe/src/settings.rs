//! Platform, compiler and build-variant settings supplied by the caller.
//!
//! Everything here is a closed sum type: recognized identities get explicit
//! arms in the translation code, and the degraded paths (unknown compiler,
//! absent standard-library setting) are explicit "contributes nothing"
//! branches rather than string comparisons that silently match nothing.

use crate::error::{Error, Result};

/// Target operating system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    Linux,
    Macos,
}

impl TargetOs {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Windows" => Ok(Self::Windows),
            "Linux" => Ok(Self::Linux),
            "Macos" => Ok(Self::Macos),
            _ => Err(Error::invalid_setting("os", value)),
        }
    }
}

/// Target CPU architecture; anything that is not 32-bit x86 builds with
/// address-model 64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arch {
    X86,
    X86_64,
}

impl Arch {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "x86" => Ok(Self::X86),
            "x86_64" => Ok(Self::X86_64),
            _ => Err(Error::invalid_setting("arch", value)),
        }
    }

    /// Address-model value passed to `b2`.
    pub fn address_model(self) -> &'static str {
        match self {
            Self::X86 => "32",
            Self::X86_64 => "64",
        }
    }
}

/// Build variant, case-folded verbatim into the `variant=` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Debug" => Ok(Self::Debug),
            "Release" => Ok(Self::Release),
            _ => Err(Error::invalid_setting("build_type", value)),
        }
    }

    pub fn variant(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// MSVC runtime library selection. `Mt`/`Mtd` imply static runtime linkage,
/// which drives the `runtime-link=` flag, the `s` ABI tag and the
/// shared-library coercion in [`crate::Options::normalize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MsvcRuntime {
    Mt,
    Mtd,
    Md,
    Mdd,
}

impl MsvcRuntime {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "MT" => Ok(Self::Mt),
            "MTd" => Ok(Self::Mtd),
            "MD" => Ok(Self::Md),
            "MDd" => Ok(Self::Mdd),
            _ => Err(Error::invalid_setting("compiler.runtime", value)),
        }
    }

    pub fn is_static(self) -> bool {
        matches!(self, Self::Mt | Self::Mtd)
    }
}

/// C++ standard library implementation, where the compiler exposes the
/// choice. Absent on MSVC; optional on gcc/clang.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StdLib {
    LibStdCxx,
    LibStdCxx11,
    LibCxx,
}

impl StdLib {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "libstdc++" => Ok(Self::LibStdCxx),
            "libstdc++11" => Ok(Self::LibStdCxx11),
            "libc++" => Ok(Self::LibCxx),
            _ => Err(Error::invalid_setting("compiler.libcxx", value)),
        }
    }
}

/// Compiler identity. Three families are recognized by the flag builder;
/// `Other` carries the reported name and contributes no toolset flag, which
/// lets `b2` fall back to its own default (accepted degraded mode).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Compiler {
    VisualStudio { version: u32, runtime: MsvcRuntime },
    Gcc { libcxx: Option<StdLib> },
    Clang { libcxx: Option<StdLib> },
    Other { name: String },
}

impl Compiler {
    pub fn is_msvc(&self) -> bool {
        matches!(self, Self::VisualStudio { .. })
    }

    pub fn is_gcc(&self) -> bool {
        matches!(self, Self::Gcc { .. })
    }

    /// Standard-library setting, when this compiler exposes one.
    pub fn libcxx(&self) -> Option<StdLib> {
        match self {
            Self::Gcc { libcxx } | Self::Clang { libcxx } => *libcxx,
            Self::VisualStudio { .. } | Self::Other { .. } => None,
        }
    }

    /// Static runtime linkage, on the family that distinguishes it.
    pub fn static_runtime(&self) -> bool {
        match self {
            Self::VisualStudio { runtime, .. } => runtime.is_static(),
            _ => false,
        }
    }
}

/// The full settings bundle supplied before any hook runs.
#[derive(Clone, Debug)]
pub struct Settings {
    pub os: TargetOs,
    pub arch: Arch,
    pub compiler: Compiler,
    pub build_type: BuildType,
}

impl Settings {
    pub fn is_windows(&self) -> bool {
        self.os == TargetOs::Windows
    }

    pub fn is_msvc(&self) -> bool {
        self.compiler.is_msvc()
    }

    /// Settings as flat key/value pairs, the form fed into the package
    /// identity fingerprint.
    pub fn fingerprint_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("os".to_string(), format!("{:?}", self.os)),
            ("arch".to_string(), format!("{:?}", self.arch)),
            ("build_type".to_string(), format!("{:?}", self.build_type)),
        ];
        match &self.compiler {
            Compiler::VisualStudio { version, runtime } => {
                fields.push(("compiler".to_string(), "Visual Studio".to_string()));
                fields.push(("compiler.version".to_string(), version.to_string()));
                fields.push(("compiler.runtime".to_string(), format!("{runtime:?}")));
            }
            Compiler::Gcc { libcxx } => {
                fields.push(("compiler".to_string(), "gcc".to_string()));
                if let Some(libcxx) = libcxx {
                    fields.push(("compiler.libcxx".to_string(), format!("{libcxx:?}")));
                }
            }
            Compiler::Clang { libcxx } => {
                fields.push(("compiler".to_string(), "clang".to_string()));
                if let Some(libcxx) = libcxx {
                    fields.push(("compiler.libcxx".to_string(), format!("{libcxx:?}")));
                }
            }
            Compiler::Other { name } => {
                fields.push(("compiler".to_string(), name.clone()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_static_detection() {
        assert!(MsvcRuntime::Mt.is_static());
        assert!(MsvcRuntime::Mtd.is_static());
        assert!(!MsvcRuntime::Md.is_static());
        assert!(!MsvcRuntime::Mdd.is_static());
    }

    #[test]
    fn test_address_model() {
        assert_eq!(Arch::X86.address_model(), "32");
        assert_eq!(Arch::X86_64.address_model(), "64");
    }

    #[test]
    fn test_libcxx_absent_on_msvc() {
        let compiler = Compiler::VisualStudio {
            version: 14,
            runtime: MsvcRuntime::Md,
        };
        assert_eq!(compiler.libcxx(), None);
        assert!(!compiler.static_runtime());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(TargetOs::parse("FreeBSD").is_err());
        assert!(BuildType::parse("RelWithDebInfo").is_err());
        assert!(StdLib::parse("msvcrt").is_err());
    }
}
