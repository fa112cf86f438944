use phonenumber::country;
use strum::Display;

/// Messages the embedded widget emits to its host page.
///
/// A closed union replaces the original open string-typed channel: hosts
/// match on the variant instead of sniffing message shapes, and nothing
/// outside these two events ever crosses the frame boundary. The transport
/// (and sender-origin validation, which production hosts must perform) lives
/// with the embedding layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WidgetEvent {
    /// The widget's rendered height changed; the host should resize the
    /// containing frame.
    #[strum(serialize = "WIDGET_RESIZE")]
    Resize { height: u32 },
    /// A phone number was verified end to end.
    #[strum(serialize = "PHONE_VERIFIED")]
    Verified {
        e164: String,
        region: Option<country::Id>,
    },
}

impl WidgetEvent {
    /// Wire tag of the event, stable across releases.
    pub fn kind(&self) -> String {
        self.to_string()
    }
}
