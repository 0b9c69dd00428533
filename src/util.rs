use itertools::Itertools;


// If a string consists of a single character, returns the character.
pub fn as_single_char(s: &str) -> Option<char> {
    s.chars().collect_tuple().map(|(single_char,)| single_char)
}
