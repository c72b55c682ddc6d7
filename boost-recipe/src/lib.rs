//! Packaging recipe for the Boost C++ libraries.
//!
//! This crate owns the declarative side of the recipe: the feature-toggle
//! schema, the translation from toggles + platform settings into a `b2`
//! command line, the conditional dependency requirements, and the
//! platform/toolset-dependent artifact naming used to locate build outputs.
//!
//! The heavy lifting (compiling Boost itself) is delegated to Boost.Build,
//! driven by the `package` binary (enable the `package` feature). Everything
//! in the library is a pure function of the supplied [`Settings`] and
//! [`Options`].

pub mod artifacts;
pub mod deps;
pub mod error;
pub mod flags;
pub mod metadata;
pub mod options;
pub mod settings;

pub use crate::{
    deps::DependencyRequirement,
    error::{Error, Result},
    options::{Library, Options},
    settings::{Arch, BuildType, Compiler, MsvcRuntime, Settings, StdLib, TargetOs},
};

/// Boost release packaged by this recipe.
pub const BOOST_VERSION: &str = "1.63.0";

/// Unpacked source folder name, `boost_1_63_0`.
pub fn source_folder() -> String {
    format!("boost_{}", BOOST_VERSION.replace('.', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_folder_uses_underscored_version() {
        assert_eq!(source_folder(), "boost_1_63_0");
    }
}
