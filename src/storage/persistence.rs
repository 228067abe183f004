//! Ledger persistence layer
//!
//! Provides save/load functionality for the ledger. A reload restores all
//! balance, allowance, total-supply, and metadata values exactly, and the
//! event log stays appendable across sessions.

use crate::ledger::Token;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub ledger_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".ledger_data"),
            ledger_file: "ledger.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Ledger storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the ledger file path
    fn ledger_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> std::path::PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.ledger_file, index))
    }

    /// Save the ledger to disk
    pub fn save(&self, token: &Token) -> Result<(), StorageError> {
        let path = self.ledger_path();

        // Create backup if enabled
        if self.config.backup_enabled && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("ledger.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, token)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<Token, StorageError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let token: Token = serde_json::from_reader(reader)?;

        Ok(token)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                let next = self.backup_path(i + 1);
                fs::rename(&current, &next)?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<Token, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        let file = fs::File::open(&backup_path)?;
        let reader = BufReader::new(file);

        let token: Token = serde_json::from_reader(reader)?;

        Ok(token)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        let mut backups = Vec::new();

        for i in 0..self.config.max_backups {
            if self.backup_path(i).exists() {
                backups.push(i);
            }
        }

        backups
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.ledger_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        let backup_count = self.list_backups().len();

        Ok(StorageStats {
            file_size,
            backup_count,
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: std::path::PathBuf,
}

/// Save a ledger to a specific file path
pub fn save_to_file(token: &Token, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, token)?;
    Ok(())
}

/// Load a ledger from a specific file path
pub fn load_from_file(path: &Path) -> Result<Token, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let token: Token = serde_json::from_reader(reader)?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Address;
    use crate::amount::Amount;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn create_test_token() -> Token {
        Token::new(
            Amount::from(1_000_000_000u64),
            "ZYM".to_string(),
            "ZYM".to_string(),
            18,
            addr(0x10),
        )
        .unwrap()
    }

    #[test]
    fn test_save_load_ledger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        let mut token = create_test_token();
        token
            .transfer(addr(0x10), addr(0x11), Amount::from(2666u16))
            .unwrap();
        token
            .approve(addr(0x10), addr(0x12), Amount::MAX)
            .unwrap();

        // Save
        storage.save(&token).unwrap();
        assert!(storage.exists());

        // Load restores every observable value exactly
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.name(), "ZYM");
        assert_eq!(loaded.symbol(), "ZYM");
        assert_eq!(loaded.decimals(), 18);
        assert_eq!(loaded.total_supply(), token.total_supply());
        assert_eq!(loaded.balance_of(&addr(0x10)), token.balance_of(&addr(0x10)));
        assert_eq!(loaded.balance_of(&addr(0x11)), Amount::from(2666u16));
        assert_eq!(loaded.allowance(&addr(0x10), &addr(0x12)), Amount::MAX);
        assert_eq!(loaded.events().entries(), token.events().entries());
    }

    #[test]
    fn test_log_appendable_across_sessions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        let mut token = create_test_token();
        storage.save(&token).unwrap();

        // Second session appends to the reloaded log
        let mut reloaded = storage.load().unwrap();
        reloaded
            .transfer(addr(0x10), addr(0x11), Amount::from(1u8))
            .unwrap();
        storage.save(&reloaded).unwrap();

        let final_state = storage.load().unwrap();
        assert_eq!(final_state.events().len(), 2);

        token
            .transfer(addr(0x10), addr(0x11), Amount::from(1u8))
            .unwrap();
        assert_eq!(final_state.events().entries(), token.events().entries());
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups: 3,
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        let mut token = create_test_token();

        // Save multiple times
        for i in 0..5u8 {
            storage.save(&token).unwrap();
            token
                .transfer(addr(0x10), addr(0x11), Amount::from(i))
                .unwrap();
        }

        // Should have 3 backups (max)
        let backups = storage.list_backups();
        assert!(backups.len() <= 3);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        assert!(!storage.exists());
        assert!(matches!(
            storage.load(),
            Err(StorageError::InvalidData(_))
        ));
    }
}
