//! Static English reference data for plaintext scoring
//!
//! Word, bigram and trigram lists are sorted so lookups can binary search.

/// Relative frequency of each letter `A..=Z` in English text.
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094, 0.06966, 0.00153,
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056,
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
];

/// Index of Coincidence of typical English text.
pub const ENGLISH_IC: f64 = 0.067;

/// Common English words, sorted.
pub const COMMON_WORDS: &[&str] = &[
    "A", "ABLE", "ABOUT", "AFTER", "AGAIN", "AGENT", "ALL", "ALSO", "ALWAYS", "AM",
    "AN", "AND", "ANY", "ARE", "ARMY", "AS", "ASK", "AT", "ATTACK", "AWAY",
    "BACK", "BE", "BECAUSE", "BEEN", "BEFORE", "BEGIN", "BELIEVE", "BETWEEN", "BOOK", "BRIDGE",
    "BRING", "BUT", "BY", "CALL", "CAN", "CASTLE", "CHILD", "CIPHER", "CITY", "CODE",
    "COME", "COULD", "DAWN", "DAY", "DEFEND", "DID", "DISCOVERED", "DO", "DOWN", "EAST",
    "END", "ENEMY", "EVEN", "EVERY", "EYE", "FACT", "FATHER", "FEEL", "FIND", "FIRST",
    "FLEE", "FOR", "FROM", "GET", "GIVE", "GO", "GOLD", "GOOD", "GREAT", "HAD",
    "HAND", "HAPPEN", "HAS", "HAVE", "HE", "HEAR", "HELLO", "HELP", "HER", "HERE",
    "HIDE", "HIGH", "HIM", "HIS", "HOLD", "HOME", "HOUSE", "HOW", "I", "IF",
    "IN", "INTO", "IS", "IT", "ITS", "JUST", "KEEP", "KEY", "KING", "KNOW",
    "LARGE", "LAST", "LEAVE", "LEFT", "LET", "LIFE", "LIKE", "LITTLE", "LIVE", "LONG",
    "LOOK", "LOSE", "LOT", "LOVE", "MAKE", "MAN", "MANY", "MAY", "ME", "MEAN",
    "MEET", "MESSAGE", "MIDNIGHT", "MIGHT", "MONTH", "MORE", "MORNING", "MOST", "MOTHER", "MOVE",
    "MUCH", "MUST", "MY", "NAME", "NEED", "NEVER", "NEW", "NEXT", "NIGHT", "NO",
    "NOON", "NORTH", "NOT", "NOW", "NUMBER", "OF", "OFF", "OLD", "ON", "ONCE",
    "ONE", "ONLY", "OR", "ORDER", "OTHER", "OUR", "OUT", "OVER", "OWN", "PAY",
    "PEOPLE", "PLACE", "PLAN", "PLAY", "POINT", "POSITION", "PUT", "QUEEN", "RETREAT", "RIGHT",
    "RIVER", "ROOM", "RUN", "SAID", "SAME", "SAY", "SECRET", "SEE", "SEEM", "SEND",
    "SHALL", "SHE", "SHOULD", "SHOW", "SIGNAL", "SMALL", "SO", "SOME", "SOUTH", "STAND",
    "STORY", "TAKE", "TELL", "THAN", "THAT", "THE", "THEIR", "THEM", "THEN", "THERE",
    "THESE", "THEY", "THING", "THINK", "THIS", "THROUGH", "TIME", "TO", "TOMORROW", "TONIGHT",
    "TREE", "TRUTH", "TRY", "TWO", "UNDER", "UNTIL", "UP", "US", "USE", "VERY",
    "WAIT", "WALL", "WANT", "WAS", "WATER", "WAY", "WE", "WELL", "WERE", "WEST",
    "WHAT", "WHEN", "WHERE", "WHICH", "WHILE", "WHO", "WHY", "WILL", "WITH", "WOMAN",
    "WORD", "WORK", "WORLD", "WOULD", "WRITE", "YEAR", "YOU", "YOUR",
];

/// Most frequent English bigrams, sorted.
pub const COMMON_BIGRAMS: &[&str] = &[
    "AL", "AN", "AR", "AS", "AT", "DE", "EA", "ED", "EN", "ER", "ES", "ET",
    "HA", "HE", "HI", "IN", "IS", "IT", "LD", "LE", "ND", "NG", "NT", "OF",
    "ON", "OR", "OU", "RA", "RE", "SA", "SE", "SI", "ST", "TE", "TH", "TI",
    "TO", "UR", "VE",
];

/// Most frequent English trigrams, sorted.
pub const COMMON_TRIGRAMS: &[&str] = &[
    "ALL", "AND", "ATI", "ENT", "ERE", "ERS", "EST", "FOR", "HAT", "HEN", "HER", "HIS",
    "ING", "ION", "ITH", "NTH", "OFT", "ONT", "OTH", "RES", "STH", "TER", "THA", "THE",
    "THI", "TIO", "VER", "WAS", "WIT", "YOU",
];

/// Longest entry in [`COMMON_WORDS`].
pub const LONGEST_WORD: usize = 10;

pub fn is_common_word(word: &str) -> bool {
    COMMON_WORDS.binary_search(&word).is_ok()
}

pub fn is_common_bigram(pair: &str) -> bool {
    COMMON_BIGRAMS.binary_search(&pair).is_ok()
}

pub fn is_common_trigram(triple: &str) -> bool {
    COMMON_TRIGRAMS.binary_search(&triple).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(list: &[&str]) {
        for pair in list.windows(2) {
            assert!(pair[0] < pair[1], "{} must sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_lists_are_sorted_and_unique() {
        assert_sorted(COMMON_WORDS);
        assert_sorted(COMMON_BIGRAMS);
        assert_sorted(COMMON_TRIGRAMS);
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let total: f64 = ENGLISH_FREQUENCIES.iter().sum();
        assert!((total - 1.0).abs() < 0.001, "total = {}", total);
    }

    #[test]
    fn test_longest_word() {
        let longest = COMMON_WORDS.iter().map(|w| w.len()).max().unwrap();
        assert_eq!(longest, LONGEST_WORD);
    }

    #[test]
    fn test_lookups() {
        assert!(is_common_word("THE"));
        assert!(!is_common_word("XQZ"));
        assert!(is_common_bigram("TH"));
        assert!(is_common_trigram("ING"));
    }
}
