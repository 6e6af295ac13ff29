use std::collections::HashSet;

use crate::paragraph::{ClassType, Paragraph};
use crate::Config;

/// Assign `initial_class` to every block from its own features.
pub(crate) fn classify(
    paragraphs: &mut [Paragraph],
    stoplist: &HashSet<String>,
    config: &Config,
) {
    for p in paragraphs.iter_mut() {
        p.heading = !config.no_headings && p.in_heading();
        p.initial_class = initial_class(p, stoplist, config);
    }
}

fn initial_class(p: &Paragraph, stoplist: &HashSet<String>, config: &Config) -> ClassType {
    if p.link_density() > config.max_link_density
        || p.text.contains('\u{00A9}')
        || p.text.contains("&copy")
        || p.dom_path.contains("select")
    {
        return ClassType::Bad;
    }

    let length = p.char_len();
    if length < config.length_low {
        return if p.link_chars > 0 {
            ClassType::Bad
        } else {
            ClassType::Short
        };
    }

    let density = p.stopword_density(stoplist);
    if density >= config.stopwords_high {
        if length > config.length_high {
            ClassType::Good
        } else {
            ClassType::NearGood
        }
    } else if density >= config.stopwords_low {
        ClassType::NearGood
    } else {
        ClassType::Bad
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

/// Class of the closest block in `direction` that is not `Short`
/// (nor `NearGood` when `skip_near_good`). The document edge counts as `Bad`.
fn neighbour(
    paragraphs: &[Paragraph],
    i: usize,
    direction: Direction,
    skip_near_good: bool,
) -> ClassType {
    let counts = |p: &&Paragraph| match p.class_type {
        ClassType::Short => false,
        ClassType::NearGood => !skip_near_good,
        ClassType::Good | ClassType::Bad => true,
    };
    let found = match direction {
        Direction::Back => paragraphs[..i].iter().rev().find(counts),
        Direction::Forward => paragraphs[i + 1..].iter().find(counts),
    };
    found.map_or(ClassType::Bad, |p| p.class_type)
}

/// True if a `Good` block starts within `max_distance` characters after block `i`.
fn good_follows(paragraphs: &[Paragraph], i: usize, max_distance: usize) -> bool {
    let mut distance = 0;
    for p in &paragraphs[i + 1..] {
        if distance > max_distance {
            break;
        }
        if p.class_type == ClassType::Good {
            return true;
        }
        distance += p.char_len();
    }
    false
}

/// Refine `class_type` using the classes of neighbouring blocks.
///
/// `initial_class` must already be set by [`classify`].
pub(crate) fn revise(paragraphs: &mut [Paragraph], max_heading_distance: usize) {
    for p in paragraphs.iter_mut() {
        p.class_type = p.initial_class;
    }

    // Short headings right before good content become near-good.
    for i in 0..paragraphs.len() {
        if paragraphs[i].heading
            && paragraphs[i].class_type == ClassType::Short
            && good_follows(paragraphs, i, max_heading_distance)
        {
            paragraphs[i].class_type = ClassType::NearGood;
        }
    }

    // Short blocks: decided against the classes before this pass, applied together.
    let decided: Vec<(usize, ClassType)> = (0..paragraphs.len())
        .filter(|&i| paragraphs[i].class_type == ClassType::Short)
        .map(|i| (i, short_class(paragraphs, i)))
        .collect();
    for (i, class) in decided {
        paragraphs[i].class_type = class;
    }

    // Near-good blocks: each decision is visible to the next.
    for i in 0..paragraphs.len() {
        if paragraphs[i].class_type != ClassType::NearGood {
            continue;
        }
        let prev = neighbour(paragraphs, i, Direction::Back, true);
        let next = neighbour(paragraphs, i, Direction::Forward, true);
        paragraphs[i].class_type = if prev == ClassType::Bad && next == ClassType::Bad {
            ClassType::Bad
        } else {
            ClassType::Good
        };
    }

    // Headings demoted only by context get another chance.
    for i in 0..paragraphs.len() {
        if paragraphs[i].heading
            && paragraphs[i].class_type == ClassType::Bad
            && paragraphs[i].initial_class != ClassType::Bad
            && good_follows(paragraphs, i, max_heading_distance)
        {
            paragraphs[i].class_type = ClassType::Good;
        }
    }
}

fn short_class(paragraphs: &[Paragraph], i: usize) -> ClassType {
    let prev = neighbour(paragraphs, i, Direction::Back, true);
    let next = neighbour(paragraphs, i, Direction::Forward, true);
    match (prev, next) {
        (ClassType::Good, ClassType::Good) => ClassType::Good,
        (ClassType::Bad, ClassType::Bad) => ClassType::Bad,
        _ => {
            let near_good_before = prev == ClassType::Bad
                && neighbour(paragraphs, i, Direction::Back, false) == ClassType::NearGood;
            let near_good_after = next == ClassType::Bad
                && neighbour(paragraphs, i, Direction::Forward, false) == ClassType::NearGood;
            if near_good_before || near_good_after {
                ClassType::Good
            } else {
                ClassType::Bad
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, link_chars: usize) -> Paragraph {
        Paragraph::new("html.body.p".to_string(), text.to_string(), link_chars, 0)
    }

    fn with_class(class: ClassType) -> Paragraph {
        let mut p = block("x", 0);
        p.initial_class = class;
        p
    }

    fn words(list: &[&str]) -> HashSet<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn classes(ps: &[Paragraph]) -> Vec<ClassType> {
        ps.iter().map(|p| p.class_type).collect()
    }

    #[test]
    fn link_density_threshold_is_exclusive() {
        let mut ps = vec![
            block(&"0123456789".repeat(2), 0),
            block(&"0123456789".repeat(2), 20),
            block(&"0123456789".repeat(8), 40),
            block(&"0123456789".repeat(8), 41),
        ];
        let config = Config::default().with_max_link_density(0.5);
        classify(&mut ps, &HashSet::new(), &config);
        let initial: Vec<_> = ps.iter().map(|p| p.initial_class).collect();
        assert_eq!(
            initial,
            vec![ClassType::Short, ClassType::Bad, ClassType::Bad, ClassType::Bad]
        );
    }

    #[test]
    fn short_block_with_links_is_bad() {
        let mut ps = vec![block("Read more", 0), block("Read more", 4)];
        let config = Config::default().with_max_link_density(1.0);
        classify(&mut ps, &HashSet::new(), &config);
        assert_eq!(ps[0].initial_class, ClassType::Short);
        assert_eq!(ps[1].initial_class, ClassType::Bad);
    }

    #[test]
    fn stopword_thresholds() {
        let mut ps = vec![
            block("0 1 2 3 4 5 6 7 8 9", 0),
            block(&"0 1 2 3 4 5 6 7 8 9 ".repeat(3), 0),
            block("1 2 3 4 5 6 7 8 9", 0),
        ];
        let config = Config::default()
            .with_length_low(0)
            .with_length_high(20)
            .with_stopwords_low(0.1)
            .with_stopwords_high(0.1);
        classify(&mut ps, &words(&["0"]), &config);
        assert_eq!(ps[0].initial_class, ClassType::NearGood);
        assert_eq!(ps[1].initial_class, ClassType::Good);
        assert_eq!(ps[2].initial_class, ClassType::Bad);
    }

    #[test]
    fn copyright_lines_are_bad() {
        let long = format!("\u{00A9} 2024 Example Corp {}", "word ".repeat(40));
        let mut ps = vec![block(&long, 0), block("&copy; 2024 Acme", 0)];
        classify(&mut ps, &HashSet::new(), &Config::default());
        assert_eq!(ps[0].initial_class, ClassType::Bad);
        assert_eq!(ps[1].initial_class, ClassType::Bad);
    }

    #[test]
    fn headings_flag_respects_config() {
        let mut ps = vec![Paragraph::new("html.body.h2".into(), "Title".into(), 0, 0)];
        classify(&mut ps, &HashSet::new(), &Config::default());
        assert!(ps[0].heading);
        classify(&mut ps, &HashSet::new(), &Config::default().with_no_headings(true));
        assert!(!ps[0].heading);
    }

    #[test]
    fn short_between_good_becomes_good() {
        let mut ps = vec![
            with_class(ClassType::Good),
            with_class(ClassType::Short),
            with_class(ClassType::Good),
        ];
        revise(&mut ps, 200);
        assert_eq!(classes(&ps), vec![ClassType::Good; 3]);
    }

    #[test]
    fn short_at_document_edge_is_bad() {
        let mut ps = vec![with_class(ClassType::Short), with_class(ClassType::Good)];
        revise(&mut ps, 200);
        assert_eq!(classes(&ps), vec![ClassType::Bad, ClassType::Good]);
    }

    #[test]
    fn short_after_near_good_is_rescued() {
        let mut ps = vec![
            with_class(ClassType::NearGood),
            with_class(ClassType::Short),
            with_class(ClassType::Good),
        ];
        revise(&mut ps, 200);
        assert_eq!(classes(&ps), vec![ClassType::Good; 3]);

        let mut ps = vec![
            with_class(ClassType::Bad),
            with_class(ClassType::Short),
            with_class(ClassType::Good),
        ];
        revise(&mut ps, 200);
        assert_eq!(ps[1].class_type, ClassType::Bad);
    }

    #[test]
    fn near_good_between_bad_is_bad() {
        let mut ps = vec![
            with_class(ClassType::Bad),
            with_class(ClassType::NearGood),
            with_class(ClassType::Bad),
            with_class(ClassType::NearGood),
            with_class(ClassType::Good),
        ];
        revise(&mut ps, 200);
        assert_eq!(
            classes(&ps),
            vec![
                ClassType::Bad,
                ClassType::Bad,
                ClassType::Bad,
                ClassType::Good,
                ClassType::Good
            ]
        );
    }

    #[test]
    fn short_heading_before_good_is_kept() {
        let mut heading = with_class(ClassType::Short);
        heading.heading = true;
        let mut ps = vec![with_class(ClassType::Bad), heading, with_class(ClassType::Good)];
        revise(&mut ps, 200);
        assert_eq!(ps[1].class_type, ClassType::Good);
    }

    #[test]
    fn heading_rescues_the_short_block_below_it() {
        let mut heading = with_class(ClassType::Short);
        heading.heading = true;
        let mut ps = vec![
            with_class(ClassType::Bad),
            heading,
            with_class(ClassType::Short),
            with_class(ClassType::Good),
        ];
        revise(&mut ps, 200);
        assert_eq!(
            classes(&ps),
            vec![
                ClassType::Bad,
                ClassType::Good,
                ClassType::Good,
                ClassType::Good
            ]
        );
    }

    #[test]
    fn heading_too_far_from_good_is_dropped() {
        let mut heading = with_class(ClassType::Short);
        heading.heading = true;
        let mut filler = block(&"x".repeat(50), 0);
        filler.initial_class = ClassType::Bad;
        let mut ps = vec![heading, filler, with_class(ClassType::Good)];
        revise(&mut ps, 10);
        assert_eq!(ps[0].class_type, ClassType::Bad);
    }
}
