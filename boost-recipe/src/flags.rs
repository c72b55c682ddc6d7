//! Translation from toggle state + settings into the `b2` command line.
//!
//! The flag list is assembled in a fixed precedence; order only matters to
//! `b2`'s own parsing (later entries may override earlier ones), not here.
//! Optional settings that a compiler family does not expose contribute
//! nothing rather than erroring.

use crate::error::{Error, Result};
use crate::options::{Library, Options};
use crate::settings::{Compiler, Settings, StdLib};

/// Name of the custom configuration file referenced on every command line
/// and written into the source folder before `b2` runs.
pub const USER_CONFIG_JAM: &str = "user-config.jam";

/// The one policy invariant: a compiled build with every library disabled
/// has nothing to build and must abort before any external process starts.
pub fn validate_enabled_set(options: &Options) -> Result<()> {
    if options.enabled_libraries().is_empty() && !options.header_only {
        return Err(Error::AllLibrariesDisabled);
    }
    Ok(())
}

/// Contents of the referenced `user-config.jam`.
///
/// MPI-dependent libraries need Boost.Build's `using mpi ;` toolchain
/// declaration; everything else leaves the file empty.
pub fn user_config(options: &Options) -> String {
    if !options.is_disabled(Library::Mpi) || !options.is_disabled(Library::GraphParallel) {
        "using mpi ;\n".to_string()
    } else {
        String::new()
    }
}

/// The ordered `b2` flag list for this configuration.
pub fn build_flags(settings: &Settings, options: &Options) -> Vec<String> {
    let mut flags = Vec::new();

    flags.push(format!("--user-config={USER_CONFIG_JAM}"));

    match &settings.compiler {
        Compiler::VisualStudio { version, .. } => flags.push(format!("toolset=msvc-{version}.0")),
        Compiler::Gcc { .. } => flags.push("toolset=gcc".to_string()),
        Compiler::Clang { .. } => flags.push("toolset=clang".to_string()),
        // Unrecognized compilers contribute no toolset flag; b2 falls back
        // to its own default.
        Compiler::Other { .. } => {}
    }

    flags.push(format!(
        "link={}",
        if options.shared { "shared" } else { "static" }
    ));
    if let Compiler::VisualStudio { runtime, .. } = &settings.compiler {
        flags.push(format!(
            "runtime-link={}",
            if runtime.is_static() { "static" } else { "shared" }
        ));
    }
    flags.push(format!("variant={}", settings.build_type.variant()));
    flags.push(format!("address-model={}", settings.arch.address_model()));

    for lib in options.disabled_libraries() {
        flags.push(format!("--without-{}", lib.flag_name()));
    }

    let mut cxx_flags: Vec<String> = Vec::new();

    // Standard-library selection. Compilers without a libcxx setting skip
    // the whole block.
    if let Some(libcxx) = settings.compiler.libcxx() {
        match libcxx {
            StdLib::LibStdCxx => flags.push("define=_GLIBCXX_USE_CXX11_ABI=0".to_string()),
            StdLib::LibStdCxx11 => flags.push("define=_GLIBCXX_USE_CXX11_ABI=1".to_string()),
            StdLib::LibCxx => {}
        }
        if matches!(settings.compiler, Compiler::Clang { .. }) {
            if libcxx == StdLib::LibCxx {
                cxx_flags.push("-stdlib=libc++".to_string());
                cxx_flags.push("-std=c++11".to_string());
                // libc++ must also be selected at link time.
                flags.push("linkflags=\"-stdlib=libc++\"".to_string());
            } else {
                cxx_flags.push("-stdlib=libstdc++".to_string());
                cxx_flags.push("-std=c++11".to_string());
            }
        }
    }

    if !options.cxxdefines.is_empty() {
        for define in percent_decode(&options.cxxdefines).split(';') {
            flags.push(format!("define={define}"));
        }
    }

    if !options.cxxflags.is_empty() {
        cxx_flags.extend(percent_decode(&options.cxxflags).split(';').map(String::from));
    }

    if !cxx_flags.is_empty() {
        flags.push(format!("cxxflags=\"{}\"", cxx_flags.join(" ")));
    }

    flags
}

/// Decode `%XX` escapes; the caller's option syntax reserves `=` so values
/// arrive with `%3D` in its place. Malformed escapes pass through verbatim.
pub fn percent_decode(value: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        (b as char).to_digit(16).map(|v| v as u8)
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
