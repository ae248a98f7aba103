//! Application state definitions

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ItemRecord;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Certificates,
    Files,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            Self::Certificates => "Certificates",
            Self::Files => "Files",
        }
    }
}

/// One certificate row from the server listing
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateRow {
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub not_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub folder_url: String,
    #[serde(default)]
    pub system_path: String,
    #[serde(default)]
    pub system_folder: String,
}

impl CertificateRow {
    /// Adapt the row to its action record. Certificates have no in-browser
    /// view of their own, so the navigate slot stays empty.
    pub fn record(&self) -> ItemRecord {
        ItemRecord::new(
            "",
            &self.download_url,
            &self.folder_url,
            &self.system_path,
            &self.system_folder,
            false,
        )
    }
}

/// One file-browser row from the server listing
#[derive(Debug, Clone, Deserialize)]
pub struct FileRow {
    pub name: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub folder_url: String,
    #[serde(default)]
    pub system_path: String,
    #[serde(default)]
    pub system_folder: String,
}

impl FileRow {
    pub fn record(&self) -> ItemRecord {
        ItemRecord::new(
            &self.url,
            &self.download_url,
            &self.folder_url,
            &self.system_path,
            &self.system_folder,
            self.is_dir,
        )
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Which list surface is showing
    pub current_view: View,
    /// Certificate listing rows
    pub certificates: Vec<CertificateRow>,
    /// File listing rows
    pub files: Vec<FileRow>,
    /// Selected row per surface
    pub selected_certificate: usize,
    pub selected_file: usize,
    /// Whether the server answered the last request
    pub server_connected: bool,
}

impl AppState {
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::Certificates => self.certificates.len(),
            View::Files => self.files.len(),
        }
    }

    pub fn selected_row(&self) -> usize {
        match self.current_view {
            View::Certificates => self.selected_certificate,
            View::Files => self.selected_file,
        }
    }

    pub fn select_next_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let selected = self.selected_row_mut();
        *selected = (*selected + 1).min(count - 1);
    }

    pub fn select_prev_row(&mut self) {
        let selected = self.selected_row_mut();
        *selected = selected.saturating_sub(1);
    }

    /// Keep the selection valid after a listing refresh.
    pub fn clamp_selection(&mut self) {
        let count = self.row_count();
        let selected = self.selected_row_mut();
        *selected = (*selected).min(count.saturating_sub(1));
    }

    /// The action record for the selected row of the current view.
    pub fn selected_record(&self) -> Option<ItemRecord> {
        match self.current_view {
            View::Certificates => self
                .certificates
                .get(self.selected_certificate)
                .map(CertificateRow::record),
            View::Files => self.files.get(self.selected_file).map(FileRow::record),
        }
    }

    fn selected_row_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Certificates => &mut self.selected_certificate,
            View::Files => &mut self.selected_file,
        }
    }
}
