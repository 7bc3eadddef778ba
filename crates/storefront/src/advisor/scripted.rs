//! Offline style consultant with canned replies.

use async_trait::async_trait;

use super::{AdvisorError, StyleAdvisor};

/// Keyword groups and the reply each one triggers, checked in order.
const REPLIES: &[(&[&str], &str)] = &[
    (
        &["wedding", "biye", "groom", "holud", "reception"],
        "For a wedding, a Deep Emerald or Golden Zardosi panjabi in rich silk makes a regal \
statement. Pair it with a cream churidar and let the embroidery speak for itself.",
    ),
    (
        &["eid"],
        "Eid calls for something graceful: our Classic Cream Silk or a soft Jamdani motif in \
Emerald Green is a timeless choice at premium BDT pricing.",
    ),
    (
        &["jummah", "friday", "prayer", "mosque"],
        "For Jummah, a breathable Off-White Cotton panjabi keeps you comfortable and \
dignified. Simple, clean lines work best.",
    ),
    (
        &["casual", "office", "daily", "everyday", "hangout"],
        "For everyday wear, try our Midnight Black Minimalist or a Navy Blue cotton cut. Both \
are light enough for the humid Dhaka weather.",
    ),
    (
        &["size", "fit", "measurement", "chest"],
        "Measure your chest and compare it with our Size Guide; most customers with a 40 inch \
chest wear a Medium. When between sizes, choose the larger for a relaxed fit.",
    ),
    (
        &["color", "colour"],
        "Emerald Green and Cream are our most loved shades, while Black and Navy Blue give a \
sharper modern look. Choose by occasion: lighter tones by day, deeper tones at night.",
    ),
];

const DEFAULT_REPLY: &str = "Tell me the occasion (Eid, a wedding, Jummah or casual wear) and \
I will suggest the perfect panjabi. Our silk, cotton and Jamdani pieces come in Emerald Green, \
Cream, Black and Navy Blue.";

/// Answers from a fixed script keyed on occasion keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedAdvisor;

impl ScriptedAdvisor {
    /// The canned reply for `prompt`.
    #[must_use]
    pub fn reply_for(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();
        REPLIES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| prompt.contains(k)))
            .map_or(DEFAULT_REPLY, |&(_, reply)| reply)
    }
}

#[async_trait]
impl StyleAdvisor for ScriptedAdvisor {
    async fn advise(&self, prompt: &str) -> Result<String, AdvisorError> {
        Ok(Self::reply_for(prompt).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occasion_keywords() {
        assert!(ScriptedAdvisor::reply_for("My cousin's WEDDING is next week").contains("Zardosi"));
        assert!(ScriptedAdvisor::reply_for("something for eid").contains("Cream Silk"));
        assert!(ScriptedAdvisor::reply_for("Jummah prayer").contains("Cotton"));
    }

    #[test]
    fn test_wedding_wins_over_eid() {
        assert!(ScriptedAdvisor::reply_for("an Eid wedding").contains("wedding"));
    }

    #[test]
    fn test_unknown_prompt_gets_default() {
        assert_eq!(ScriptedAdvisor::reply_for("hello"), DEFAULT_REPLY);
    }
}
