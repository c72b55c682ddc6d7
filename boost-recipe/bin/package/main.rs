//! Boost packaging orchestrator.
//!
//! Runs the recipe hooks in fixed order: configure (normalize toggles,
//! declare dependency requirements, report the package identity), acquire
//! the source distribution, drive Boost.Build, then collect artifacts and
//! publish consumer metadata.
//!
//! Usage: cargo run --features package --bin package -- [OPTIONS]

mod b2;
mod publish;
mod source;
mod util;

use std::env;
use std::path::PathBuf;
use std::process::exit;

use boost_recipe::{
    deps::resolve_dependencies, metadata::package_id, Arch, BuildType, Compiler, MsvcRuntime,
    Options, Settings, StdLib, TargetOs, BOOST_VERSION,
};

pub struct RecipeConfig {
    pub settings: Settings,
    pub options: Options,
    /// Where the source archive is downloaded and unpacked.
    pub work_dir: PathBuf,
    /// Package output root (include/, lib/, bin/, manifest.txt).
    pub dest_dir: PathBuf,
    /// Where the FindBoost.cmake helper files live.
    pub helpers_dir: PathBuf,
    pub jobs: usize,
    pub verbose: bool,
}

impl RecipeConfig {
    /// Unpacked source tree, `<work_dir>/boost_1_63_0`.
    pub fn source_folder(&self) -> PathBuf {
        self.work_dir.join(boost_recipe::source_folder())
    }
}

fn print_usage() {
    eprintln!(
        r#"package - download, build and package Boost {BOOST_VERSION}

USAGE:
    package [OPTIONS]

OPTIONS:
    --os <OS>                 Target OS: Windows, Linux, Macos [default: host]
    --arch <ARCH>             Target arch: x86, x86_64 [default: host]
    --build-type <TYPE>       Debug or Release [default: Release]
    --compiler <NAME>         "Visual Studio", gcc, clang, or any other name
    --compiler-version <N>    MSVC toolset major version [default: 14]
    --runtime <RT>            MSVC runtime: MT, MTd, MD, MDd [default: MD]
    --libcxx <LIB>            libstdc++, libstdc++11 or libc++
    -o, --option <NAME=VALUE> Set a recipe toggle (repeatable), e.g.
                              -o without_python=False -o shared=False
    -s, --source-dir <DIR>    Download/unpack directory [default: ./boost-src]
    -d, --dest <DIR>          Package output directory [default: ./boost-package]
    -j, --jobs <N>            Parallel build jobs [default: num_cpus]
    -v, --verbose             Enable verbose output
    -h, --help                Show this help message

ENVIRONMENT:
    BOOST_RECIPE_VERBOSE      Same as --verbose

For `cxxdefines` and `cxxflags`, `=` must be encoded as %3D:
    -o cxxdefines="MACRO1;MACRO2%3D1" -o cxxflags="-Werror%3Duninitialized"
"#
    );
}

fn host_os() -> TargetOs {
    match env::consts::OS {
        "windows" => TargetOs::Windows,
        "macos" => TargetOs::Macos,
        _ => TargetOs::Linux,
    }
}

fn host_arch() -> Arch {
    if env::consts::ARCH == "x86" {
        Arch::X86
    } else {
        Arch::X86_64
    }
}

fn parse_args() -> Result<RecipeConfig, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut os = host_os();
    let mut arch = host_arch();
    let mut build_type = BuildType::Release;
    let mut compiler_name: Option<String> = None;
    let mut compiler_version: u32 = 14;
    let mut runtime = MsvcRuntime::Md;
    let mut libcxx: Option<StdLib> = None;
    let mut options = Options::default();
    let mut work_dir = PathBuf::from("./boost-src");
    let mut dest_dir = PathBuf::from("./boost-package");
    let mut jobs = num_cpus::get();
    let mut verbose = env::var("BOOST_RECIPE_VERBOSE").is_ok();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--os" => {
                i += 1;
                os = TargetOs::parse(required(&args, i, "--os")?)?;
            }
            "--arch" => {
                i += 1;
                arch = Arch::parse(required(&args, i, "--arch")?)?;
            }
            "--build-type" => {
                i += 1;
                build_type = BuildType::parse(required(&args, i, "--build-type")?)?;
            }
            "--compiler" => {
                i += 1;
                compiler_name = Some(required(&args, i, "--compiler")?.to_string());
            }
            "--compiler-version" => {
                i += 1;
                compiler_version = required(&args, i, "--compiler-version")?
                    .parse()
                    .map_err(|_| "invalid number for --compiler-version")?;
            }
            "--runtime" => {
                i += 1;
                runtime = MsvcRuntime::parse(required(&args, i, "--runtime")?)?;
            }
            "--libcxx" => {
                i += 1;
                libcxx = Some(StdLib::parse(required(&args, i, "--libcxx")?)?);
            }
            "-o" | "--option" => {
                i += 1;
                let assignment = required(&args, i, "--option")?;
                let (name, value) = assignment
                    .split_once('=')
                    .ok_or_else(|| format!("expected NAME=VALUE, got `{assignment}`"))?;
                options.set(name, value)?;
            }
            "-s" | "--source-dir" => {
                i += 1;
                work_dir = PathBuf::from(required(&args, i, "--source-dir")?);
            }
            "-d" | "--dest" => {
                i += 1;
                dest_dir = PathBuf::from(required(&args, i, "--dest")?);
            }
            "-j" | "--jobs" => {
                i += 1;
                jobs = required(&args, i, "--jobs")?
                    .parse()
                    .map_err(|_| "invalid number for --jobs")?;
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_usage();
                exit(0);
            }
            arg => return Err(format!("unknown argument: {arg}").into()),
        }
        i += 1;
    }

    let compiler_name = compiler_name.unwrap_or_else(|| {
        match os {
            TargetOs::Windows => "Visual Studio",
            TargetOs::Macos => "clang",
            TargetOs::Linux => "gcc",
        }
        .to_string()
    });
    let compiler = match compiler_name.as_str() {
        "Visual Studio" => Compiler::VisualStudio {
            version: compiler_version,
            runtime,
        },
        "gcc" => Compiler::Gcc { libcxx },
        "clang" => Compiler::Clang { libcxx },
        _ => Compiler::Other {
            name: compiler_name,
        },
    };

    let helpers_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    Ok(RecipeConfig {
        settings: Settings {
            os,
            arch,
            compiler,
            build_type,
        },
        options,
        work_dir,
        dest_dir,
        helpers_dir,
        jobs,
        verbose,
    })
}

fn required<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("missing argument for {flag}"))
}

fn run(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Recipe configuration:");
    println!("  Boost: {BOOST_VERSION}");
    println!("  OS: {:?}", cfg.settings.os);
    println!("  Arch: {:?}", cfg.settings.arch);
    println!("  Compiler: {:?}", cfg.settings.compiler);
    println!("  Build type: {:?}", cfg.settings.build_type);
    let link = if cfg.options.header_only {
        "header-only"
    } else if cfg.options.shared {
        "shared"
    } else {
        "static"
    };
    println!("  Link: {link}");
    println!("  Jobs: {}", cfg.jobs);
    println!("  Dest: {}", cfg.dest_dir.display());

    let requirements = resolve_dependencies(&cfg.options, &cfg.settings);
    if requirements.is_empty() {
        println!("Requirements: none");
    } else {
        println!("Requirements:");
        for req in &requirements {
            println!(
                "  {} (shared={})",
                req.reference,
                if req.shared { "True" } else { "False" }
            );
        }
    }

    let id = package_id(&cfg.settings, &cfg.options, &requirements);
    if cfg.verbose {
        println!("Package identity:");
        for (key, value) in id.settings.iter().chain(id.options.iter()) {
            println!("  {key}={value}");
        }
        for reference in &id.requires {
            println!("  requires {reference}");
        }
    }

    source::acquire(cfg)?;
    b2::build(cfg)?;
    publish::collect(cfg, &requirements)?;

    println!(
        "Package created at: {}\nLibraries: see manifest.txt",
        cfg.dest_dir.display()
    );
    Ok(())
}

fn main() {
    let mut cfg = match parse_args() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            exit(1);
        }
    };

    // Second configuration step, once both settings and options are known.
    cfg.options.normalize(&cfg.settings);

    if let Err(e) = run(&cfg) {
        eprintln!("Error: {e}");
        exit(1);
    }
}
