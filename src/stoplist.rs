use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::CleanerError;

const ENGLISH: &str = "
a about above after again against all almost also am among an and another any
are aren't around as at be because been before being below between both but by
can can't cannot could couldn't did didn't do does doesn't doing don't down
during each either else ever every few for from further had hadn't has hasn't
have haven't having he he'd he'll he's her here here's hers herself him himself
his how how's however i i'd i'll i'm i've if in into is isn't it it's its itself
just least less let's like made make many may me might more most much must
mustn't my myself neither never no nor not now of off often on once one only or
other others ought our ours ourselves out over own per perhaps rather said same
say says shall shan't she she'd she'll she's should shouldn't since so some
still such than that that's the their theirs them themselves then there there's
these they they'd they'll they're they've this those though through thus to too
under until up upon us very was wasn't we we'd we'll we're we've were weren't
what what's when when's where where's whether which while who who's whom whose
why why's will with within without won't would wouldn't yet you you'd you'll
you're you've your yours yourself yourselves
";

/// Embedded stoplists: (language_name, whitespace-separated words).
const STOPLISTS: &[(&str, &str)] = &[("English", ENGLISH)];

static PARSED: LazyLock<Vec<(&'static str, HashSet<String>)>> = LazyLock::new(|| {
    STOPLISTS
        .iter()
        .map(|(name, words)| (*name, parse_stoplist(words)))
        .collect()
});

fn parse_stoplist(contents: &str) -> HashSet<String> {
    contents
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Return the stoplist for a language, matched case-insensitively.
pub fn get_stoplist(language: &str) -> Result<HashSet<String>, CleanerError> {
    PARSED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(language))
        .map(|(_, words)| words.clone())
        .ok_or_else(|| CleanerError::UnknownLanguage(language.to_string()))
}

pub fn available_languages() -> Vec<&'static str> {
    STOPLISTS.iter().map(|(name, _)| *name).collect()
}
