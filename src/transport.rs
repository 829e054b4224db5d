//! Overlay transport
//!
//! Delivers the overlay jar into the destination's staging area and triggers
//! the merge there. Local destinations use a plain file copy plus an
//! in-process merge; remote destinations use scp for the bytes and ssh to run
//! `classpatch merge` (this same binary in merge mode) on the other side.
//!
//! The ssh/scp program names come from config so tests can point them at
//! local stubs.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::destination::Destination;
use crate::error::{PatchError, PatchResult};
use crate::merge;
use crate::staging::StagingArea;

/// Deliver the overlay jar to the destination and run the merge there.
pub fn deliver(
    overlay_jar: &Path,
    dest: &Destination,
    config: &Config,
    verbose: u8,
) -> PatchResult<()> {
    match dest {
        Destination::Local { path } => deliver_local(overlay_jar, path, verbose),
        Destination::Remote { .. } => deliver_remote(overlay_jar, dest, config, verbose),
    }
}

/// Run the restore routine at a remote destination.
pub fn remote_restore(dest: &Destination, config: &Config, verbose: u8) -> PatchResult<()> {
    let Some(target) = dest.ssh_target() else {
        return Err(PatchError::TransportFailed {
            detail: "remote restore invoked for a local destination".to_string(),
        });
    };
    let command = format!(
        "classpatch restore {}",
        shell_quote(&dest.path().display().to_string())
    );
    run_checked(
        Command::new(&config.ssh).arg(&target).arg(&command),
        verbose,
    )
}

fn deliver_local(overlay_jar: &Path, jar_path: &Path, verbose: u8) -> PatchResult<()> {
    let area = StagingArea::for_archive(jar_path);
    area.ensure_root()
        .map_err(|e| transport_err("staging destination overlay", &e.to_string()))?;
    fs::copy(overlay_jar, area.overlay_archive_path())
        .map_err(|e| transport_err("staging destination overlay", &e.to_string()))?;
    merge::run_merge(jar_path, verbose)
}

fn deliver_remote(
    overlay_jar: &Path,
    dest: &Destination,
    config: &Config,
    verbose: u8,
) -> PatchResult<()> {
    let target = dest
        .ssh_target()
        .ok_or_else(|| transport_err("resolving ssh target", "destination is local"))?;
    let jar_path = dest.path().display().to_string();
    let area = StagingArea::for_archive(dest.path());
    let staging_root = area.root().display().to_string();
    let overlay_dest = area.overlay_archive_path().display().to_string();

    // 1. Make sure the staging namespace exists on the remote side
    run_checked(
        Command::new(&config.ssh)
            .arg(&target)
            .arg(format!("mkdir -p {}", shell_quote(&staging_root))),
        verbose,
    )?;

    // 2. Copy the overlay bytes into it
    run_checked(
        Command::new(&config.scp)
            .arg(overlay_jar)
            .arg(format!("{target}:{overlay_dest}")),
        verbose,
    )?;

    // 3. Run this binary's merge mode next to the jar
    run_checked(
        Command::new(&config.ssh)
            .arg(&target)
            .arg(format!("classpatch merge {}", shell_quote(&jar_path))),
        verbose,
    )
}

fn transport_err(context: &str, detail: &str) -> PatchError {
    PatchError::TransportFailed {
        detail: format!("{context}: {detail}"),
    }
}

fn run_checked(cmd: &mut Command, verbose: u8) -> PatchResult<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    if verbose > 0 {
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        println!("running {program} {}", args.join(" "));
    }

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(if verbose > 0 {
            Stdio::inherit()
        } else {
            Stdio::null()
        })
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| transport_err(&program, &e.to_string()))?;

    if !status.success() {
        return Err(transport_err(
            &program,
            &format!("exited with {:?}", status.code()),
        ));
    }
    Ok(())
}

/// Wrap a path in single quotes for the remote shell
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
