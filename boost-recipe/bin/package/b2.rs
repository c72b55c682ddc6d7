//! Boost.Build driving: bootstrap the build engine, then run `b2` with the
//! translated flag list.
//!
//! Both steps are single blocking subprocess calls with no retries; a
//! bootstrap failure is enriched by dumping `bootstrap.log` before the
//! failure propagates, a `b2` failure propagates unmodified.

use std::fs;
use std::process::Command;

use crate::util::run_visible;
use crate::RecipeConfig;
use boost_recipe::flags::{build_flags, user_config, validate_enabled_set, USER_CONFIG_JAM};

pub fn build(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Nothing-to-build is a misconfiguration, caught before any subprocess.
    validate_enabled_set(&cfg.options)?;

    if cfg.options.header_only {
        println!("Header only package, skipping build");
        return Ok(());
    }

    bootstrap(cfg)?;

    let folder = cfg.source_folder();
    fs::write(folder.join(USER_CONFIG_JAM), user_config(&cfg.options))?;

    let flags = build_flags(&cfg.settings, &cfg.options);
    let b2 = folder.join(if cfg.settings.is_windows() { "b2.exe" } else { "b2" });

    let mut cmd = Command::new(&b2);
    cmd.args(&flags)
        .arg(format!("-j{}", cfg.jobs))
        .arg("--abbreviate-paths")
        .current_dir(&folder);

    println!(
        "{} {} -j{} --abbreviate-paths",
        b2.display(),
        flags.join(" "),
        cfg.jobs
    );
    run_visible(&mut cmd)?;
    Ok(())
}

fn bootstrap(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let folder = cfg.source_folder();

    let mut cmd = if cfg.settings.is_windows() {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "bootstrap.bat"]);
        // MinGW needs its own bootstrap toolset argument.
        if cfg.settings.compiler.is_gcc() {
            cmd.arg("mingw");
        }
        cmd
    } else {
        Command::new("./bootstrap.sh")
    };
    cmd.current_dir(&folder);

    if let Err(e) = run_visible(&mut cmd) {
        // The interesting diagnostics end up in the log, not on stderr.
        if let Ok(log) = fs::read_to_string(folder.join("bootstrap.log")) {
            println!("{log}");
        }
        return Err(e.into());
    }
    Ok(())
}
