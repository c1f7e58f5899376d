//! The four-image view of a signature: the original upload plus one derived
//! image per log kind.

use serde::Serialize;
use signet_types::{LogKind, SignatureDetail};
use strum::{AsRefStr, Display, EnumString};

/// One position in the gallery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GallerySlot {
    Original,
    Contour,
    Roi,
    Normalized,
}

impl GallerySlot {
    pub const ALL: [GallerySlot; 4] = [
        GallerySlot::Original,
        GallerySlot::Contour,
        GallerySlot::Roi,
        GallerySlot::Normalized,
    ];

    /// Log kind backing this slot; `None` for the original upload.
    pub fn log_kind(self) -> Option<LogKind> {
        match self {
            GallerySlot::Original => None,
            GallerySlot::Contour => Some(LogKind::Vis),
            GallerySlot::Roi => Some(LogKind::Roi),
            GallerySlot::Normalized => Some(LogKind::Normalized),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GallerySlot::Original => "Original",
            GallerySlot::Contour => "Contour",
            GallerySlot::Roi => "Region of interest",
            GallerySlot::Normalized => "Normalized",
        }
    }
}

/// Image URLs of one signature, partitioned by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureGallery<'a> {
    pub original: &'a str,
    pub contour: Option<&'a str>,
    pub roi: Option<&'a str>,
    pub normalized: Option<&'a str>,
}

impl<'a> SignatureGallery<'a> {
    /// When several logs share a kind, the first one in the detail wins.
    pub fn from_detail(detail: &'a SignatureDetail) -> Self {
        let first = |kind: LogKind| {
            detail
                .logs
                .iter()
                .find(|log| log.kind == kind)
                .map(|log| log.image_url.as_str())
        };
        Self {
            original: &detail.signature.image_url,
            contour: first(LogKind::Vis),
            roi: first(LogKind::Roi),
            normalized: first(LogKind::Normalized),
        }
    }

    pub fn image(&self, slot: GallerySlot) -> Option<&'a str> {
        match slot {
            GallerySlot::Original => Some(self.original),
            GallerySlot::Contour => self.contour,
            GallerySlot::Roi => self.roi,
            GallerySlot::Normalized => self.normalized,
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = (GallerySlot, Option<&'a str>)> + '_ {
        GallerySlot::ALL.into_iter().map(|slot| (slot, self.image(slot)))
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;
    use crate::testing::{detail, log, signature};

    #[test]
    fn partitions_logs_by_kind() {
        let d = detail(
            signature("sig_1", "Ann"),
            vec![
                log("l1", "sig_1", LogKind::Vis, "url_a"),
                log("l2", "sig_1", LogKind::Roi, "url_b"),
            ],
        );
        let g = SignatureGallery::from_detail(&d);

        assert_eq!(g.image(GallerySlot::Original), Some("https://storage.test/sig_1/original.png"));
        assert_eq!(g.image(GallerySlot::Contour), Some("url_a"));
        assert_eq!(g.image(GallerySlot::Roi), Some("url_b"));
        assert_eq!(g.image(GallerySlot::Normalized), None);
    }

    #[test]
    fn first_log_of_a_kind_wins() {
        let d = detail(
            signature("sig_1", "Ann"),
            vec![
                log("l1", "sig_1", LogKind::Normalized, "first"),
                log("l2", "sig_1", LogKind::Normalized, "second"),
            ],
        );
        assert_eq!(SignatureGallery::from_detail(&d).normalized, Some("first"));
    }

    #[test]
    fn slots_cover_every_position_in_order() {
        let d = detail(signature("sig_1", "Ann"), vec![]);
        let g = SignatureGallery::from_detail(&d);
        let slots: Vec<_> = g.slots().map(|(slot, _)| slot).collect();
        assert_eq!(slots, GallerySlot::ALL);
    }

    #[test]
    fn slot_names_parse_case_insensitively() {
        assert_eq!(GallerySlot::from_str("contour").unwrap(), GallerySlot::Contour);
        assert_eq!(GallerySlot::from_str("ROI").unwrap(), GallerySlot::Roi);
        assert!(GallerySlot::from_str("vis").is_err());
        assert_eq!(GallerySlot::Normalized.to_string(), "normalized");
    }
}
