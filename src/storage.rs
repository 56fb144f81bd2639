use crate::model::Ledger;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un registre depuis un support.
    fn load(&self) -> anyhow::Result<Ledger>;
    /// Sauvegarde de manière atomique.
    fn save(&self, ledger: &Ledger) -> anyhow::Result<()>;

    /// Registre vierge si le support n'existe pas encore (premier lancement).
    fn load_or_default(&self) -> anyhow::Result<Ledger>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Ledger> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let ledger: Ledger =
            serde_json::from_slice(&data).with_context(|| "parsing ledger.json")?;
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(ledger)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }

    fn load_or_default(&self) -> anyhow::Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        self.load()
    }
}
