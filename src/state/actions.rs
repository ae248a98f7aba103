//! Action resolution for context menu entries

use percent_encoding::percent_decode_str;

use super::ItemRecord;

/// The kind of effect an action entry triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenKind {
    /// Open the row's URL in the browser
    Navigate,
    /// Download the row's payload
    Download,
    /// Open the containing listing in the browser
    OpenFolder,
    /// Ask the server to reveal the path in the host file manager
    RevealLocation,
    /// Copy the row's filesystem path to the clipboard
    CopyPath,
}

/// Resolver plugged into a menu session.
pub type ItemResolver = fn(&ItemRecord) -> Vec<ActionEntry>;

/// One renderable action in the context menu.
///
/// Entries are recomputed every time a menu opens and never mutated
/// afterwards. An entry with `visible == false` carries an empty payload
/// and must never be rendered or dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub kind: OpenKind,
    pub label: &'static str,
    pub payload: String,
    pub visible: bool,
}

impl ActionEntry {
    fn hidden(kind: OpenKind, label: &'static str) -> Self {
        Self {
            kind,
            label,
            payload: String::new(),
            visible: false,
        }
    }

    fn from_target(kind: OpenKind, label: &'static str, target: Option<&str>) -> Self {
        match target {
            Some(target) => Self {
                kind,
                label,
                payload: target.to_string(),
                visible: true,
            },
            None => Self::hidden(kind, label),
        }
    }
}

/// Decode a transport-encoded attribute value to a literal string.
///
/// Values arrive query-encoded (`+` for space, `%XX` sequences); clipboard
/// payloads must be the literal filesystem path.
pub fn decode_transport_value(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let spaced = raw.replace('+', "%20");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Derive the ordered entry list for one record.
///
/// The order is fixed regardless of visibility: Navigate, Download,
/// OpenFolder, RevealLocation, CopyPath. Visibility is a pure function of
/// the record; absent fields suppress the entry.
pub fn resolve(record: &ItemRecord) -> Vec<ActionEntry> {
    let navigate_label = if record.is_container {
        "Open"
    } else {
        "Open in browser"
    };

    // Open folder only applies to rows that are not themselves containers.
    let folder_target = if record.is_container {
        None
    } else {
        record.folder_target()
    };

    let copy_payload = record
        .system_path
        .as_deref()
        .map(decode_transport_value)
        .filter(|path| !path.is_empty());

    vec![
        ActionEntry::from_target(OpenKind::Navigate, navigate_label, record.navigate_url.as_deref()),
        ActionEntry::from_target(OpenKind::Download, "Download", record.download_url.as_deref()),
        ActionEntry::from_target(OpenKind::OpenFolder, "Open folder", folder_target),
        ActionEntry::from_target(
            OpenKind::RevealLocation,
            "Open file location",
            record.reveal_target(),
        ),
        match copy_payload {
            Some(payload) => ActionEntry {
                kind: OpenKind::CopyPath,
                label: "Copy path",
                payload,
                visible: true,
            },
            None => ActionEntry::hidden(OpenKind::CopyPath, "Copy path"),
        },
    ]
}
