/// Run driver - from a parsed command to a finished, certified wipe
use super::prompt::Prompter;
use super::{Command, WipeArgs};
use crate::auth::CredentialConfig;
use crate::config::Config;
use crate::error::{Result, WipeError, exit_codes};
use crate::lock::{LockGate, LockStatus};
use crate::oplog::OperationLog;
use crate::report::{self, CertificateHeader};
use crate::scan::scan_file;
use crate::walker::PathWalker;
use crate::wipe::ChunkedOverwriter;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    File,
    Folder,
    Drive,
}

/// Execute `command` and return the process exit code.
pub fn execute<R: BufRead, W: Write>(
    command: Command,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<i32> {
    match command {
        Command::File(args) => wipe(TargetKind::File, args, config, prompter),
        Command::Folder(args) => wipe(TargetKind::Folder, args, config, prompter),
        Command::Drive(args) => wipe(TargetKind::Drive, args, config, prompter),
        Command::CheckLock { path } => check_lock(&path, config, prompter),
        Command::HashPassword => hash_password(prompter),
    }
}

/// Gate on the configured credential, if any.
pub fn authenticate<R: BufRead, W: Write>(
    credential: Option<&CredentialConfig>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let Some(credential) = credential else {
        return Ok(());
    };
    prompter.say("\n🔐 Password required to proceed\n")?;
    let entered = prompter.password("Enter password")?;
    if credential.verify(&entered) {
        Ok(())
    } else {
        Err(WipeError::Auth("incorrect password".to_string()))
    }
}

fn wipe<R: BufRead, W: Write>(
    kind: TargetKind,
    args: WipeArgs,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<i32> {
    let algorithm = args.algorithm.unwrap_or(config.algorithm);
    let workers = args.workers.unwrap_or(config.workers);
    let target = args.target.as_path();

    authenticate(config.credential.as_ref(), prompter)?;
    validate_target(kind, target)?;

    let gate = LockGate::new(config.lock_policy);

    let proceed = match kind {
        TargetKind::File => {
            prompter.confirm(&format!(
                "Are you sure you want to permanently wipe the file: {}?",
                target.display()
            ))? && file_preflight(target, &gate, config, prompter)?
        }
        TargetKind::Folder => prompter.confirm(&format!(
            "Are you sure you want to permanently wipe all data from folder: {}?",
            target.display()
        ))?,
        TargetKind::Drive => {
            prompter.confirm(&format!(
                "Are you sure you want to permanently wipe all data from drive: {}?",
                target.display()
            ))? && prompter.confirm("Type 'yes' again to confirm final wipe:")?
        }
    };
    if !proceed {
        prompter.say("Operation cancelled.\n")?;
        return Ok(exit_codes::USER_ERROR);
    }

    let walker = PathWalker::new(gate, ChunkedOverwriter::new(config.chunk_size)).with_workers(workers);
    let log = walker.wipe_tree(target, algorithm)?;

    let header = CertificateHeader::collect(algorithm, target);
    let certified = write_certificates(&args, config, &header, &log, prompter);
    if let Err(e) = &certified {
        // files are already gone; the log must still reach the operator
        warn!(error = %e, "certificate not written, echoing log");
        prompter.say(&format!("\n❌ {}\n⚠️  Certificate contents follow:\n\n", e))?;
        prompter.say(&report::render_text(&header, &log))?;
    }

    print_summary(&log, prompter)?;
    Ok(if certified.is_err() || log.summary().has_failures() {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::SUCCESS
    })
}

fn write_certificates<R: BufRead, W: Write>(
    args: &WipeArgs,
    config: &Config,
    header: &CertificateHeader,
    log: &OperationLog,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let certificate_path = args
        .certificate
        .as_deref()
        .unwrap_or(config.certificate_path.as_path());
    report::write_text_certificate(certificate_path, header, log)?;
    prompter.say(&format!("\n✅ Log certificate generated: {}\n", certificate_path.display()))?;

    if let Some(json_path) = args.json.as_deref().or(config.json_certificate_path.as_deref()) {
        report::write_json_certificate(json_path, header, log)?;
        prompter.say(&format!("✅ JSON certificate generated: {}\n", json_path.display()))?;
    }
    Ok(())
}

fn validate_target(kind: TargetKind, target: &Path) -> Result<()> {
    let ok = match kind {
        TargetKind::File => target.is_file(),
        TargetKind::Folder | TargetKind::Drive => target.is_dir(),
    };
    if ok {
        return Ok(());
    }
    if !target.exists() {
        return Err(WipeError::RootNotFound(target.to_path_buf()));
    }
    let expected = match kind {
        TargetKind::File => "a regular file",
        TargetKind::Folder => "a folder",
        TargetKind::Drive => "a mounted drive directory",
    };
    Err(WipeError::Aborted(format!(
        "Invalid path: {} is not {}",
        target.display(),
        expected
    )))
}

/// Single-file checks: refuse locked files, warn on sensitive content.
fn file_preflight<R: BufRead, W: Write>(
    target: &Path,
    gate: &LockGate,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<bool> {
    let status = gate.check(target);
    if gate.decide(&status) {
        return Err(WipeError::Aborted(format!(
            "❌ File is currently open or locked ({}). Cannot wipe.",
            status
        )));
    }

    match scan_file(target, &config.sensitive_keywords, config.scan_limit_bytes) {
        Ok(flagged) if !flagged.is_empty() => {
            prompter.say(&format!(
                "\n⚠️  Sensitive content detected in {}: {}\n",
                target.display(),
                flagged.join(", ")
            ))?;
            prompter.confirm("Do you still want to wipe this file?")
        }
        Ok(_) => Ok(true),
        Err(e) => {
            warn!(path = %target.display(), error = %e, "keyword scan failed");
            Ok(true)
        }
    }
}

fn check_lock<R: BufRead, W: Write>(path: &Path, config: &Config, prompter: &mut Prompter<R, W>) -> Result<i32> {
    if !path.exists() {
        return Err(WipeError::RootNotFound(path.to_path_buf()));
    }
    let gate = LockGate::new(config.lock_policy);
    let status = gate.check(path);
    let glyph = match status {
        LockStatus::Unlocked => "🔓",
        LockStatus::Locked { .. } => "🔒",
        LockStatus::Unknown(_) => "❓",
    };
    prompter.say(&format!("{} {}: {}\n", glyph, path.display(), status))?;
    Ok(if gate.decide(&status) {
        exit_codes::USER_ERROR
    } else {
        exit_codes::SUCCESS
    })
}

fn hash_password<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<i32> {
    let first = prompter.password("Enter new password")?;
    let second = prompter.password("Confirm password")?;
    if first != second {
        return Err(WipeError::Aborted("❌ Passwords do not match.".to_string()));
    }
    let credential = CredentialConfig::create(&first).map_err(WipeError::Aborted)?;
    let block = serde_json::json!({ "credential": credential });
    let rendered = serde_json::to_string_pretty(&block)
        .map_err(|e| WipeError::Aborted(format!("failed to render credential: {}", e)))?;
    prompter.say(&format!("{}\n", rendered))?;
    Ok(exit_codes::SUCCESS)
}

fn print_summary<R: BufRead, W: Write>(log: &OperationLog, prompter: &mut Prompter<R, W>) -> Result<()> {
    let summary = log.summary();
    prompter.say(&format!(
        "🧾 {} wiped, {} locked, {} failed, {} interrupted\n",
        summary.wiped, summary.locked, summary.failed, summary.interrupted
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::kdf::pbkdf2_sha256;
    use crate::lock::LockPolicy;
    use crate::wipe::WipeAlgorithm;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

    fn prompter(input: &str) -> TestPrompter {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn args(target: &Path, cert_dir: &Path) -> WipeArgs {
        WipeArgs {
            target: target.to_path_buf(),
            algorithm: Some(WipeAlgorithm::SinglePass),
            workers: None,
            certificate: Some(cert_dir.join("cert.log")),
            json: Some(cert_dir.join("cert.json")),
            yes: false,
        }
    }

    fn config() -> Config {
        // fail-open keeps these tests independent of the host's inspector
        Config {
            chunk_size: 4096,
            lock_policy: LockPolicy::FailOpen,
            ..Config::default()
        }
    }

    #[test]
    fn test_folder_wipe_writes_certificates() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        fs::write(data.path().join("a.txt"), b"one").unwrap();
        fs::write(data.path().join("b.txt"), b"two").unwrap();

        let mut p = prompter("yes\n");
        let code = execute(Command::Folder(args(data.path(), certs.path())), &config(), &mut p).unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!data.path().join("a.txt").exists());
        let text = fs::read_to_string(certs.path().join("cert.log")).unwrap();
        assert!(text.contains("Random Pass"));
        assert!(text.contains("Wiped: 2"));
        assert!(certs.path().join("cert.json").exists());
    }

    #[test]
    fn test_declined_confirmation_touches_nothing() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let file = data.path().join("keep.txt");
        fs::write(&file, b"keep").unwrap();

        let mut p = prompter("no\n");
        let code = execute(Command::Folder(args(data.path(), certs.path())), &config(), &mut p).unwrap();

        assert_eq!(code, exit_codes::USER_ERROR);
        assert!(file.exists());
        assert!(!certs.path().join("cert.log").exists());
    }

    #[test]
    fn test_drive_requires_second_confirmation() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let file = data.path().join("keep.txt");
        fs::write(&file, b"keep").unwrap();

        let mut p = prompter("yes\nno\n");
        let code = execute(Command::Drive(args(data.path(), certs.path())), &config(), &mut p).unwrap();
        assert_eq!(code, exit_codes::USER_ERROR);
        assert!(file.exists());
    }

    #[test]
    fn test_sensitive_file_needs_extra_confirmation() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let file = data.path().join("notes.txt");
        fs::write(&file, b"my password is hunter2").unwrap();

        let mut p = prompter("yes\nno\n");
        let code = execute(Command::File(args(&file, certs.path())), &config(), &mut p).unwrap();
        assert_eq!(code, exit_codes::USER_ERROR);
        assert!(file.exists());
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Sensitive content detected"));
        assert!(output.contains("password"));
    }

    #[test]
    fn test_file_command_rejects_directory() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let mut p = prompter("yes\n");
        let err = execute(Command::File(args(data.path(), certs.path())), &config(), &mut p).unwrap_err();
        assert!(matches!(err, WipeError::Aborted(_)));
    }

    #[test]
    fn test_missing_target() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let missing = data.path().join("nope");
        let mut p = prompter("yes\n");
        let err = execute(Command::Folder(args(&missing, certs.path())), &config(), &mut p).unwrap_err();
        assert!(matches!(err, WipeError::RootNotFound(_)));
    }

    #[test]
    fn test_wrong_password_stops_before_wipe() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let file = data.path().join("f.txt");
        fs::write(&file, b"x").unwrap();

        let salt = b"saltsaltsaltsalt";
        let mut cfg = config();
        cfg.credential = Some(CredentialConfig {
            salt: hex::encode(salt),
            hash: hex::encode(pbkdf2_sha256(b"right", salt, 5)),
            iterations: 5,
        });

        let mut p = prompter("wrong\nyes\n");
        let err = execute(Command::Folder(args(data.path(), certs.path())), &cfg, &mut p).unwrap_err();
        assert!(matches!(err, WipeError::Auth(_)));
        assert!(file.exists());

        let mut p = prompter("right\nyes\n");
        let code = execute(Command::Folder(args(data.path(), certs.path())), &cfg, &mut p).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!file.exists());
    }

    #[test]
    fn test_unwritable_certificate_still_reports_log() {
        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let file = data.path().join("gone.txt");
        fs::write(&file, b"wipe me").unwrap();

        let mut wipe_args = args(&file, certs.path());
        // an existing directory cannot be written as a file
        wipe_args.certificate = Some(certs.path().to_path_buf());
        wipe_args.json = None;

        let mut p = prompter("yes\n");
        let code = execute(Command::File(wipe_args), &config(), &mut p).unwrap();

        assert_eq!(code, exit_codes::PARTIAL_FAILURE);
        assert!(!file.exists());
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("failed to write certificate"));
        assert!(output.contains(&format!("{} - Random Pass", file.display())));
        assert!(output.contains("1 wiped"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_targets_are_wiped() {
        use std::os::unix::fs::symlink;

        let data = tempdir().unwrap();
        let certs = tempdir().unwrap();
        let links = tempdir().unwrap();
        let secret = data.path().join("secret.txt");
        fs::write(&secret, b"launch codes").unwrap();
        let file_link = links.path().join("file_link");
        symlink(&secret, &file_link).unwrap();

        let mut p = prompter("yes\n");
        let code = execute(Command::File(args(&file_link, certs.path())), &config(), &mut p).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!secret.exists());

        let nested = data.path().join("folder");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.txt"), b"more codes").unwrap();
        let dir_link = links.path().join("dir_link");
        symlink(&nested, &dir_link).unwrap();

        let mut p = prompter("yes\n");
        let code = execute(Command::Folder(args(&dir_link, certs.path())), &config(), &mut p).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!nested.join("inner.txt").exists());
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("1 wiped"));
    }

    #[test]
    fn test_hash_password_round_trip() {
        let mut p = prompter("pa55word\npa55word\n");
        assert_eq!(hash_password(&mut p).unwrap(), exit_codes::SUCCESS);
        let output = String::from_utf8(p.into_output()).unwrap();
        let json_start = output.find('{').unwrap();
        let value: serde_json::Value = serde_json::from_str(&output[json_start..]).unwrap();
        let credential: CredentialConfig = serde_json::from_value(value["credential"].clone()).unwrap();
        assert!(credential.verify("pa55word"));
    }

    #[test]
    fn test_hash_password_mismatch() {
        let mut p = prompter("one\ntwo\n");
        assert!(hash_password(&mut p).is_err());
    }

    #[test]
    fn test_check_lock_free_file() {
        let data = tempdir().unwrap();
        let file: PathBuf = data.path().join("free");
        fs::write(&file, b"x").unwrap();
        let mut p = prompter("");
        assert_eq!(check_lock(&file, &config(), &mut p).unwrap(), exit_codes::SUCCESS);
    }
}
