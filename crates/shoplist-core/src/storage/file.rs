//! Delimiter-separated text file store.
//!
//! One item per record, six fields:
//! `category;name;manufacturer;price;quantity;description`, no header row.
//! Quoting follows the usual CSV rules, so a field may hold the delimiter,
//! double quotes or line breaks.

use crate::errors::AppError;
use crate::storage::{ListRecord, ListStore};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::path::PathBuf;
use tokio::fs;

const FIELD_COUNT: usize = 6;

pub struct FileStore {
    path: PathBuf,
    delimiter: u8,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    fn storage_error(&self, message: impl std::fmt::Display) -> AppError {
        AppError::Storage(format!("{}: {}", self.path.display(), message))
    }

    fn decode_row(&self, row: &StringRecord) -> Result<ListRecord, AppError> {
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != FIELD_COUNT {
            return Err(self.storage_error(format!(
                "line {}: expected {} fields, found {}",
                line,
                FIELD_COUNT,
                row.len()
            )));
        }

        let quantity_text = &row[4];
        let quantity = quantity_text.trim().parse::<u32>().map_err(|_| {
            self.storage_error(format!(
                "line {}: '{}' is not a valid quantity",
                line, quantity_text
            ))
        })?;

        Ok(ListRecord {
            category: row[0].to_string(),
            name: row[1].to_string(),
            manufacturer: row[2].to_string(),
            price: row[3].to_string(),
            quantity,
            description: row[5].to_string(),
        })
    }

    pub(crate) fn decode(&self, content: &[u8]) -> Result<Vec<ListRecord>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| self.storage_error(e))?;
            records.push(self.decode_row(&row)?);
        }
        Ok(records)
    }

    pub(crate) fn encode(&self, records: &[ListRecord]) -> Result<Vec<u8>, AppError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for record in records {
            let quantity = record.quantity.to_string();
            writer
                .write_record([
                    record.category.as_str(),
                    record.name.as_str(),
                    record.manufacturer.as_str(),
                    record.price.as_str(),
                    quantity.as_str(),
                    record.description.as_str(),
                ])
                .map_err(|e| self.storage_error(e))?;
        }
        writer.into_inner().map_err(|e| self.storage_error(e))
    }
}

#[async_trait]
impl ListStore for FileStore {
    async fn load(&self) -> Result<Vec<ListRecord>, AppError> {
        if !fs::try_exists(&self.path).await? {
            log::debug!("{} does not exist yet, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read(&self.path).await?;
        let records = self.decode(&content)?;
        log::debug!("Loaded {} items from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn save(&self, records: &[ListRecord]) -> Result<(), AppError> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, self.encode(records)?).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                log::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        log::debug!("Saved {} items to {}", records.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(category: &str, name: &str, description: &str) -> ListRecord {
        ListRecord {
            category: category.to_string(),
            name: name.to_string(),
            manufacturer: "Samsung".to_string(),
            price: "899.99".to_string(),
            quantity: 1,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_encode_plain_row() {
        let store = FileStore::new("unused.csv", b';');
        let bytes = store
            .encode(&[record("Smartphone", "Galaxy S21", "Dual SIM")])
            .unwrap();
        assert_eq!(bytes, b"Smartphone;Galaxy S21;Samsung;899.99;1;Dual SIM\n");
    }

    #[test]
    fn test_fields_with_delimiter_or_quotes_are_quoted() {
        let store = FileStore::new("unused.csv", b';');
        let original = record("Computer", "X1", "Fast; light \"pro\" model");
        let encoded = store.encode(&[original.clone()]).unwrap();
        assert_eq!(
            String::from_utf8(encoded.clone()).unwrap(),
            "Computer;X1;Samsung;899.99;1;\"Fast; light \"\"pro\"\" model\"\n"
        );
        assert_eq!(store.decode(&encoded).unwrap(), vec![original]);
    }

    #[test]
    fn test_line_breaks_inside_a_field_survive() {
        let store = FileStore::new("unused.csv", b';');
        let records = vec![
            record("Smartphone", "A", "line1\nline2"),
            record("Computer", "B", "after"),
        ];
        let encoded = store.encode(&records).unwrap();
        assert_eq!(store.decode(&encoded).unwrap(), records);
    }

    #[test]
    fn test_decode_skips_blank_lines_and_crlf() {
        let store = FileStore::new("unused.csv", b';');
        let content = b"Smartphone;A;Samsung;1.00;1;x\r\n\r\nComputer;B;Dell;2;3;\r\n";
        let records = store.decode(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].quantity, 3);
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        let store = FileStore::new("list.csv", b';');
        let err = store
            .decode(b"Smartphone;A;Samsung;1.00;1;x\nComputer;B;Dell;2\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(msg) if msg.contains("line 2") && msg.contains("expected 6")));
    }

    #[test]
    fn test_decode_rejects_bad_quantity() {
        let store = FileStore::new("list.csv", b';');
        let err = store
            .decode(b"Smartphone;A;Samsung;1.00;many;x\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(msg) if msg.contains("'many'")));
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("shoppingList.csv"), b';');
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoppingList.csv");
        let store = FileStore::new(&path, b',');
        let records = vec![
            record("Smartphone", "Galaxy S21", "Dual SIM, 5G"),
            record("Computer", "ThinkPad X1", ""),
        ];

        store.save(&records).await.unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("shoppingList.csv.tmp").exists());
        assert_eq!(store.load().await.unwrap(), records);

        store.save(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoppingList.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();
        let store = FileStore::new(&path, b';');

        assert!(store.save(&[record("Computer", "B", "")]).await.is_err());
        assert!(!dir.path().join("shoppingList.csv.tmp").exists());
    }
}
