//! Source acquisition: download the Boost distribution and the post-release
//! atomic patch, unpack, and apply the patch.
//!
//! Downloads are skipped when a same-named file already exists; there is no
//! checksum verification.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::util::run_visible;
use crate::RecipeConfig;
use boost_recipe::BOOST_VERSION;

// Post-release patch for Boost.Atomic:
// http://www.boost.org/users/history/version_1_63_0.html#version_1_63_0.post_release_patches
const ATOMIC_PATCH_URL: &str = "https://github.com/boostorg/atomic/commit/a67cc1b.patch";
const ATOMIC_PATCH_FILE: &str = "a67cc1b.patch";

pub fn acquire(cfg: &RecipeConfig) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&cfg.work_dir)?;

    let folder_name = boost_recipe::source_folder();
    let archive_name = if cfg!(windows) {
        format!("{folder_name}.zip")
    } else {
        format!("{folder_name}.tar.gz")
    };
    let archive_path = cfg.work_dir.join(&archive_name);
    let url = format!(
        "http://sourceforge.net/projects/boost/files/boost/{BOOST_VERSION}/{archive_name}/download"
    );

    download(&url, &archive_path)?;
    let folder = cfg.source_folder();
    if !folder.is_dir() {
        println!("Extracting {archive_name}...");
        extract(&archive_path, &cfg.work_dir)?;
    }
    fs::remove_file(&archive_path)?;

    let patch_path = cfg.work_dir.join(ATOMIC_PATCH_FILE);
    download(ATOMIC_PATCH_URL, &patch_path)?;
    println!("Applying {ATOMIC_PATCH_URL}...");
    apply_patch(&patch_path, &folder.join("boost").join("atomic").join("detail"), 4)?;

    Ok(())
}

/// Fetch `url` into `dest` unless the file is already present.
fn download(url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Downloading{} {}...",
        if dest.is_file() { " (cached)" } else { "" },
        url
    );
    if dest.is_file() {
        return Ok(());
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(300)))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let resp = agent.get(url).call()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP {status} for {url}").into());
    }

    // Write through a temp file so an interrupted download never passes the
    // exists-check on the next run.
    let tmp = dest.with_extension("tmp");
    let mut reader = resp.into_body().into_reader();
    let mut file = fs::File::create(&tmp)?;
    std::io::copy(&mut reader, &mut file)?;
    file.sync_all()?;
    fs::rename(&tmp, dest)?;
    Ok(())
}

fn extract(archive: &Path, dest: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::File::open(archive)?;
    if archive.extension().is_some_and(|e| e == "zip") {
        zip::ZipArchive::new(file)?.extract(dest)?;
    } else {
        Archive::new(GzDecoder::new(file)).unpack(dest)?;
    }
    Ok(())
}

fn apply_patch(patch: &Path, base: &Path, strip: u32) -> Result<(), Box<dyn std::error::Error>> {
    let patch = patch.canonicalize()?;
    run_visible(
        Command::new("patch")
            .arg(format!("-p{strip}"))
            .arg("-i")
            .arg(&patch)
            .current_dir(base),
    )?;
    Ok(())
}
