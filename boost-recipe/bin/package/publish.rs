//! Artifact collection and metadata publication.
//!
//! Copies the consumer-facing discovery helpers, the public header tree and
//! the staged build outputs into the package layout, then writes the
//! consumer metadata (preprocessor defines + resolved library names) to
//! `manifest.txt`.

use std::fs;
use std::path::Path;

use crate::RecipeConfig;
use boost_recipe::deps::DependencyRequirement;
use boost_recipe::metadata::package_metadata;
use boost_recipe::BOOST_VERSION;

pub fn collect(
    cfg: &RecipeConfig,
    requirements: &[DependencyRequirement],
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&cfg.dest_dir)?;

    copy_helpers(cfg)?;
    copy_headers(cfg)?;
    copy_stage_libs(cfg)?;
    write_manifest(cfg, requirements)?;

    Ok(())
}

/// Copy `FindBoost.cmake` and `OriginalFindBoost*` verbatim into the
/// package root, so CMake consumers resolve this package instead of a
/// system Boost. Missing helpers are skipped, matching glob-copy semantics.
fn copy_helpers(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let Ok(read) = fs::read_dir(&cfg.helpers_dir) else {
        return Ok(());
    };
    for entry in read.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if name == "FindBoost.cmake" || name.starts_with("OriginalFindBoost") {
            fs::copy(&path, cfg.dest_dir.join(name))?;
        }
    }
    Ok(())
}

/// Copy the public header tree, `<source>/boost` -> `<dest>/include/boost`.
fn copy_headers(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let src = cfg.source_folder().join("boost");
    if !src.is_dir() {
        return Err(format!("Boost headers not found at {}", src.display()).into());
    }
    let dst = cfg.dest_dir.join("include").join("boost");
    copy_dir_all(&src, &dst)?;
    println!("Copied headers to {}", dst.display());
    Ok(())
}

fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)?.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        if path.is_dir() {
            copy_dir_all(&path, &dst.join(name))?;
        } else {
            fs::copy(&path, dst.join(name))?;
        }
    }
    Ok(())
}

/// Copy the staged build outputs from `<source>/stage/lib`: archives,
/// shared objects (with and without version suffix), macOS dylibs and
/// Windows import libraries go to `lib/`, DLLs to `bin/`.
fn copy_stage_libs(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stage = cfg.source_folder().join("stage").join("lib");
    let Ok(read) = fs::read_dir(&stage) else {
        // Header-only builds stage nothing.
        return Ok(());
    };

    let mut copied = 0usize;
    for entry in read.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(subdir) = dest_subdir(name) else {
            continue;
        };
        let dst_dir = cfg.dest_dir.join(subdir);
        fs::create_dir_all(&dst_dir)?;
        fs::copy(&path, dst_dir.join(name))?;
        copied += 1;
    }
    println!("Copied {copied} library file(s) from {}", stage.display());
    Ok(())
}

fn dest_subdir(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".dll") {
        Some("bin")
    } else if lower.ends_with(".a")
        || lower.ends_with(".lib")
        || lower.ends_with(".so")
        || lower.contains(".so.")
        || lower.contains(".dylib")
    {
        Some("lib")
    } else {
        None
    }
}

fn write_manifest(
    cfg: &RecipeConfig,
    requirements: &[DependencyRequirement],
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = package_metadata(&cfg.settings, &cfg.options);

    let mut body = String::new();
    body.push_str("recipe=boost-recipe\n");
    body.push_str(&format!("boost_version={BOOST_VERSION}\n"));
    for req in requirements {
        body.push_str(&format!("requires={}\n", req.reference));
    }
    for define in &metadata.defines {
        body.push_str(&format!("define={define}\n"));
    }
    for lib in &metadata.libs {
        body.push_str(&format!("lib={lib}\n"));
    }

    fs::write(cfg.dest_dir.join("manifest.txt"), body)?;
    Ok(())
}
