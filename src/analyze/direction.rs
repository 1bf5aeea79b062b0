//! Market direction from up/down vocabulary counts.
//!
//! Each vocabulary word counts once per article it appears in; the
//! direction flips away from neutral only when one side dominates the
//! other by `dominance_ratio` (1.5 by default). Ties are neutral.

use crate::analyze::params::DirectionVocab;
use crate::article::Article;
use crate::insight::Direction;

/// Raw counts plus the classification derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSignal {
    pub up: usize,
    pub down: usize,
    pub direction: Direction,
}

pub fn detect_direction(
    articles: &[&Article],
    vocab: &DirectionVocab,
    dominance_ratio: f64,
) -> DirectionSignal {
    let mut up = 0usize;
    let mut down = 0usize;

    for article in articles {
        let text = article.text();
        up += vocab.up.iter().filter(|w| text.contains(w.as_str())).count();
        down += vocab.down.iter().filter(|w| text.contains(w.as_str())).count();
    }

    DirectionSignal {
        up,
        down,
        direction: classify(up, down, dominance_ratio),
    }
}

/// `up` if up > down × ratio, `down` if down > up × ratio, else neutral.
pub fn classify(up: usize, down: usize, dominance_ratio: f64) -> Direction {
    let (u, d) = (up as f64, down as f64);
    if u > d * dominance_ratio {
        Direction::Up
    } else if d > u * dominance_ratio {
        Direction::Down
    } else {
        Direction::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_thresholds() {
        assert_eq!(classify(10, 3, 1.5), Direction::Up);
        assert_eq!(classify(6, 5, 1.5), Direction::Neutral);
        assert_eq!(classify(1, 4, 1.5), Direction::Down);
        // exactly 1.5x is not dominance
        assert_eq!(classify(3, 2, 1.5), Direction::Neutral);
        assert_eq!(classify(0, 0, 1.5), Direction::Neutral);
        // anything beats zero
        assert_eq!(classify(1, 0, 1.5), Direction::Up);
    }

    #[test]
    fn counts_each_word_once_per_article() {
        let a = [
            Article::new("환율 상승 상승 상승", "1").with_content("급등"),
            Article::new("환율 하락", "2"),
        ];
        let refs: Vec<&Article> = a.iter().collect();
        let s = detect_direction(&refs, &DirectionVocab::default(), 1.5);
        assert_eq!(s.up, 2);
        assert_eq!(s.down, 1);
        assert_eq!(s.direction, Direction::Up);
    }

    #[test]
    fn ratio_is_configurable() {
        let a = [Article::new("상승 급등", "1"), Article::new("하락", "2")];
        let refs: Vec<&Article> = a.iter().collect();
        let strict = detect_direction(&refs, &DirectionVocab::default(), 3.0);
        assert_eq!(strict.direction, Direction::Neutral);
    }
}
