//! # Salutation and Closing Resolver
//!
//! Official correspondence pairs its opening phrase (คำขึ้นต้น) with a
//! mandatory closing phrase (คำลงท้าย) according to the seniority of the
//! addressee. The mapping is total over the closed [`RecipientRank`] set and
//! is never corrected silently: a mismatched pair is reported by the
//! validator, not rewritten.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seniority of the addressee, used only to resolve the phrase pair and to
/// check kind permissibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientRank {
    /// นายกรัฐมนตรี and peers addressed with กราบเรียน.
    HeadOfGovernment,
    Minister,
    AgencyHead,
    GeneralPublic,
}

impl RecipientRank {
    /// Every rank, for registry verification and exhaustive iteration.
    pub const ALL: [RecipientRank; 4] = [
        RecipientRank::HeadOfGovernment,
        RecipientRank::Minister,
        RecipientRank::AgencyHead,
        RecipientRank::GeneralPublic,
    ];
}

impl fmt::Display for RecipientRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecipientRank::HeadOfGovernment => "head_of_government",
            RecipientRank::Minister => "minister",
            RecipientRank::AgencyHead => "agency_head",
            RecipientRank::GeneralPublic => "general_public",
        };
        write!(f, "{name}")
    }
}

/// The mandated (opening, closing) phrase combination for one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhrasePair {
    pub opening: &'static str,
    pub closing: &'static str,
}

/// Resolves the phrase pair for a rank. Total over [`RecipientRank`].
pub fn resolve(rank: RecipientRank) -> PhrasePair {
    match rank {
        RecipientRank::HeadOfGovernment => PhrasePair {
            opening: "กราบเรียน",
            closing: "ขอแสดงความนับถืออย่างยิ่ง",
        },
        RecipientRank::Minister | RecipientRank::AgencyHead | RecipientRank::GeneralPublic => {
            PhrasePair {
                opening: "เรียน",
                closing: "ขอแสดงความนับถือ",
            }
        }
    }
}

/// Returns true only when both phrases are exactly the pair resolved for
/// `rank`. Mismatch is an expected, recoverable content condition, so this is
/// a plain bool rather than an error.
pub fn validate_pair(opening: &str, closing: &str, rank: RecipientRank) -> bool {
    let expected = resolve(rank);
    expected.opening == opening && expected.closing == closing
}

// Longest phrase first, so that ขอแสดงความนับถืออย่างยิ่ง is not mistaken for
// its ขอแสดงความนับถือ prefix.
const KNOWN_OPENINGS: &[&str] = &["กราบเรียน", "เรียน"];
const KNOWN_CLOSINGS: &[&str] = &["ขอแสดงความนับถืออย่างยิ่ง", "ขอแสดงความนับถือ"];

/// The known opening phrase a salutation section starts with, if any.
pub fn leading_opening(text: &str) -> Option<&'static str> {
    let text = text.trim_start();
    KNOWN_OPENINGS.iter().find(|p| text.starts_with(**p)).copied()
}

/// The known closing phrase a closing section starts with, if any.
pub fn leading_closing(text: &str) -> Option<&'static str> {
    let text = text.trim_start();
    KNOWN_CLOSINGS.iter().find(|p| text.starts_with(**p)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_total() {
        for rank in RecipientRank::ALL {
            let pair = resolve(rank);
            assert!(!pair.opening.is_empty());
            assert!(!pair.closing.is_empty());
        }
    }

    #[test]
    fn resolved_pair_validates() {
        for rank in RecipientRank::ALL {
            let pair = resolve(rank);
            assert!(validate_pair(pair.opening, pair.closing, rank));
        }
    }

    #[test]
    fn mixed_pair_is_rejected() {
        // กราบเรียน must close with ขอแสดงความนับถืออย่างยิ่ง.
        assert!(!validate_pair(
            "กราบเรียน",
            "ขอแสดงความนับถือ",
            RecipientRank::HeadOfGovernment
        ));
        // And the plain pair is wrong for the head of government.
        assert!(!validate_pair(
            "เรียน",
            "ขอแสดงความนับถือ",
            RecipientRank::HeadOfGovernment
        ));
    }

    #[test]
    fn leading_phrase_prefers_longest_match() {
        assert_eq!(leading_opening("กราบเรียน นายกรัฐมนตรี"), Some("กราบเรียน"));
        assert_eq!(leading_opening("เรียน อธิบดีกรมศุลกากร"), Some("เรียน"));
        assert_eq!(
            leading_closing("ขอแสดงความนับถืออย่างยิ่ง"),
            Some("ขอแสดงความนับถืออย่างยิ่ง")
        );
        assert_eq!(leading_closing("ขอแสดงความนับถือ"), Some("ขอแสดงความนับถือ"));
        assert_eq!(leading_opening("สวัสดีครับ"), None);
    }
}
