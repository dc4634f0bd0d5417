//! Static hint content: curated quotes per bucket and plain fallback messages.

use crate::buckets::BucketId;
use crate::scoring::HintCandidate;

struct CuratedQuote {
    text: &'static str,
    author: &'static str,
    source: Option<&'static str>,
    url: Option<&'static str>,
}

const DEPRESSION_PROJECT_URL: &str =
    "https://thedepressionproject.com/blogs/news/positive-uplifting-encouraging-quotes-for-depression";
const REAL_SIMPLE_URL: &str =
    "https://www.realsimple.com/work-life/life-strategies/inspiration-motivation/positive-quotes";
const GOOD_HOUSEKEEPING_URL: &str =
    "https://www.goodhousekeeping.com/health/wellness/g2401/inspirational-quotes/";

const VERY_LOW_QUOTES: &[CuratedQuote] = &[
    CuratedQuote {
        text: "When everything feels heavy, start with the smallest possible anchor. Try one minute of slow breathing, counting 4-in and 6-out.",
        author: "The Depression Project",
        source: Some("thedepressionproject.com"),
        url: Some(DEPRESSION_PROJECT_URL),
    },
    CuratedQuote {
        text: "You are brave, courageous and strong for continuing to fight an illness that nobody else can see.",
        author: "The Depression Project",
        source: Some("thedepressionproject.com"),
        url: Some(DEPRESSION_PROJECT_URL),
    },
];

const LOW_QUOTES: &[CuratedQuote] = &[
    CuratedQuote {
        text: "Nothing is impossible, the word itself says 'I'm possible.'",
        author: "Audrey Hepburn",
        source: Some("realsimple.com"),
        url: Some(REAL_SIMPLE_URL),
    },
    CuratedQuote {
        text: "Real change, enduring change, happens one step at a time.",
        author: "Ruth Bader Ginsburg",
        source: Some("realsimple.com"),
        url: Some(REAL_SIMPLE_URL),
    },
];

const NEUTRAL_QUOTES: &[CuratedQuote] = &[
    CuratedQuote {
        text: "Feelings come and go like clouds in a windy sky. Conscious breathing is my anchor.",
        author: "Thich Nhat Hanh",
        source: None,
        url: None,
    },
    CuratedQuote {
        text: "Almost everything will work again if you unplug it for a few minutes, including you.",
        author: "Anne Lamott",
        source: None,
        url: None,
    },
];

const GOOD_QUOTES: &[CuratedQuote] = &[
    CuratedQuote {
        text: "Happiness is not by chance, but by choice.",
        author: "Jim Rohn",
        source: Some("goodhousekeeping.com"),
        url: Some(GOOD_HOUSEKEEPING_URL),
    },
    CuratedQuote {
        text: "Try to be a rainbow in someone else's cloud.",
        author: "Maya Angelou",
        source: Some("realsimple.com"),
        url: Some(REAL_SIMPLE_URL),
    },
];

const GREAT_QUOTES: &[CuratedQuote] = &[
    CuratedQuote {
        text: "Gratitude unlocks the fullness of life. It turns what we have into enough, and more.",
        author: "Melody Beattie",
        source: None,
        url: None,
    },
    CuratedQuote {
        text: "Keep your face always toward the sunshine, and shadows will fall behind you.",
        author: "Walt Whitman",
        source: None,
        url: None,
    },
];

pub fn curated(bucket: BucketId) -> Vec<HintCandidate> {
    let quotes = match bucket {
        BucketId::VeryLow => VERY_LOW_QUOTES,
        BucketId::Low => LOW_QUOTES,
        BucketId::Neutral => NEUTRAL_QUOTES,
        BucketId::Good => GOOD_QUOTES,
        BucketId::Great => GREAT_QUOTES,
    };
    quotes
        .iter()
        .map(|quote| HintCandidate {
            text: quote.text.to_string(),
            attribution: quote.author.to_string(),
            source: quote.source.map(str::to_string),
            url: quote.url.map(str::to_string),
            relevance: 0.0,
        })
        .collect()
}

const DISTRESS_WORDS: &[&str] = &["overwhelmed", "anxious", "panic", "fear"];
const FLAT_WORDS: &[&str] = &["stuck", "flat", "empty", "numb"];

const VERY_LOW_FALLBACK: &str = "When everything feels heavy, start with the smallest possible anchor. \
Try one minute of slow breathing, counting 4-in and 6-out. \
Look around and name a few things you can see or touch. \
If distress continues, consider reaching out to someone you trust or a helpline. \
For now, choose one tiny action: roll your shoulders, sip water, or step outside.";

const LOW_FALLBACK: &str = "When energy is low, momentum comes from tiny wins. \
Pick a 5-minute task you can complete now: tidy one surface, stretch, or put on music. \
Consider a short walk or write about one thing you care about this week. \
Text a friend a simple check-in. Thank yourself for showing up today. \
Choose your next tiny action and commit to just two minutes.";

const NEUTRAL_FALLBACK: &str = "A steady day is a good place to build from. \
Take a short pause to notice how your body feels right now. \
Drink some water, get a little daylight, and pick one small thing you would enjoy later today. \
Checking in like this is already a kind act toward yourself.";

const GOOD_FALLBACK: &str = "Great to see some positive energy! Savor this good moment for 20 seconds. \
Consider sharing this energy with someone: send a kind note or plan something you enjoy. \
Capture one doable plan for later so the momentum has somewhere to go. \
Mark this win in your memory; small joys add up over time.";

const GREAT_FALLBACK: &str = "What a wonderful day to be having! Write down what made today feel this good \
so you can come back to it. Thank someone who was part of it. \
Use some of this energy on a goal you care about, and remember this feeling on harder days.";

/// Plain fallback for a bucket. Distress in the note pulls the message down to a gentler tier.
pub fn fallback(bucket: BucketId, note: &str) -> &'static str {
    let note = note.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| note.contains(word));

    if mentions(DISTRESS_WORDS) {
        return VERY_LOW_FALLBACK;
    }
    if mentions(FLAT_WORDS) && !matches!(bucket, BucketId::VeryLow | BucketId::Low) {
        return LOW_FALLBACK;
    }
    match bucket {
        BucketId::VeryLow => VERY_LOW_FALLBACK,
        BucketId::Low => LOW_FALLBACK,
        BucketId::Neutral => NEUTRAL_FALLBACK,
        BucketId::Good => GOOD_FALLBACK,
        BucketId::Great => GREAT_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bucket_has_curated_quotes() {
        for id in [
            BucketId::VeryLow,
            BucketId::Low,
            BucketId::Neutral,
            BucketId::Good,
            BucketId::Great,
        ] {
            assert!(!curated(id).is_empty());
        }
    }

    #[test]
    fn distress_words_escalate_fallback() {
        assert_eq!(fallback(BucketId::Great, "so anxious today"), VERY_LOW_FALLBACK);
        assert_eq!(fallback(BucketId::Good, "feeling numb"), LOW_FALLBACK);
        assert_eq!(fallback(BucketId::VeryLow, "feeling numb"), VERY_LOW_FALLBACK);
        assert_eq!(fallback(BucketId::Neutral, ""), NEUTRAL_FALLBACK);
    }
}
