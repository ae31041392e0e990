use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::error;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "quickswitch.log";
const LOG_ENV_VAR: &str = "QUICKSWITCH_LOG";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

/// Routes `tracing` output to the rotating log file. Safe to call more than
/// once; later calls keep the first subscriber.
pub fn init() -> Result<(), std::io::Error> {
    let writer = RotatingFile::open(&logs_dir(), MAX_LOG_BYTES)?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(writer))
        .try_init();

    install_panic_hook();
    Ok(())
}

/// Append-only log file that is archived once it reaches `max_bytes`, checked
/// before every write.
struct RotatingFile {
    dir: PathBuf,
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
}

impl RotatingFile {
    fn open(dir: &Path, max_bytes: u64) -> Result<Self, std::io::Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let (file, written) = open_append(&path)?;
        let mut rotating = Self {
            dir: dir.to_path_buf(),
            path,
            file,
            written,
            max_bytes,
        };
        if rotating.written >= rotating.max_bytes {
            rotating.rotate()?;
        }
        Ok(rotating)
    }

    fn rotate(&mut self) -> Result<(), std::io::Error> {
        self.file.flush()?;
        fs::rename(&self.path, archive_path(&self.dir))?;
        let (file, written) = open_append(&self.path)?;
        self.file = file;
        self.written = written;
        prune_old_archives(&self.dir)
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> Result<(File, u64), std::io::Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let written = file.metadata()?.len();
    Ok((file, written))
}

// Zero-padded nanoseconds keep archives in chronological order when sorted by
// name; a taken name moves to the next free stamp.
fn archive_path(log_dir: &Path) -> PathBuf {
    let mut stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    loop {
        let candidate = log_dir.join(format!("quickswitch-{stamp:020}.log"));
        if !candidate.exists() {
            return candidate;
        }
        stamp += 1;
    }
}

fn prune_old_archives(log_dir: &Path) -> Result<(), std::io::Error> {
    let mut archives = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_archive_name(path))
        .collect::<Vec<_>>();

    archives.sort();
    let excess = archives.len().saturating_sub(MAX_ARCHIVES);
    for oldest in archives.drain(..excess) {
        let _ = fs::remove_file(oldest);
    }
    Ok(())
}

fn is_archive_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("quickswitch-") && n.ends_with(".log"))
        .unwrap_or(false)
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            error!(%location, %payload, "panic");
            prior(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use std::io::Write;

    use super::{is_archive_name, logs_dir, prune_old_archives, RotatingFile, MAX_ARCHIVES};

    #[test]
    fn logs_dir_uses_stable_app_data_layout() {
        let dir = logs_dir();
        assert!(dir
            .to_string_lossy()
            .to_ascii_lowercase()
            .contains("quickswitch"));
    }

    #[test]
    fn only_rotated_files_count_as_archives() {
        assert!(is_archive_name(Path::new("quickswitch-00000001700000000000.log")));
        assert!(!is_archive_name(Path::new("quickswitch.log")));
        assert!(!is_archive_name(Path::new("other-1.log")));
    }

    #[test]
    fn prunes_oldest_archives_beyond_limit() {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("quickswitch-logs-{unique}"));
        std::fs::create_dir_all(&dir).unwrap();
        for stamp in 0..(MAX_ARCHIVES + 2) {
            std::fs::write(dir.join(format!("quickswitch-{stamp}.log")), b"x").unwrap();
        }

        prune_old_archives(&dir).unwrap();

        let remaining = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(remaining, MAX_ARCHIVES);
        assert!(!dir.join("quickswitch-0.log").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rotates_while_running_without_reusing_archive_names() {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("quickswitch-rotate-{unique}"));
        let mut writer = RotatingFile::open(&dir, 10).unwrap();

        for _ in 0..3 {
            writer.write_all(b"12345678").unwrap();
        }
        writer.flush().unwrap();

        let archives = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| is_archive_name(&entry.path()))
            .count();
        assert_eq!(archives, 2);
        assert_eq!(std::fs::read(dir.join("quickswitch.log")).unwrap(), b"12345678");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
