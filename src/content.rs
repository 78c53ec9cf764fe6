//! Static text shown in the overlays.

pub const TITLE: &str = "Vibe Coding Ethics";
pub const SUBTITLE: &str = "Designing with Character • Cornell Tech 2026";

pub const TERMINAL_TITLE: &str = "Main Terminal - v1.0.4";
pub const TERMINAL_BOOT: &str = "
  INITIALIZING VIBE-CODING-ETHICS...

  [SYSTEM]: LOAD MODULE 0x7F21
  [SYSTEM]: CHARACTER ANALYZER ONLINE
  [SYSTEM]: CONNECTING TO CORNELL TECH REPO...

  > WELCOME TO SUMMER 2026
  > DESIGNING WITH CHARACTER

  _";
/// Seconds per revealed terminal character.
pub const TERMINAL_CHAR_INTERVAL: f32 = 0.03;
pub const TASKBAR_CLOCK: &str = "Friday 14:42 | Cornell Tech OS";

pub struct Section {
    pub heading: &'static str,
    pub bullets: &'static [&'static str],
    pub body: &'static str,
}

pub const SYLLABUS_FILE: &str = "syllabus.rtf";
pub const SYLLABUS_TERM: &str = "Cornell Tech, Summer 2026";
pub const SYLLABUS_INSTRUCTOR: &str = "Instructor: Hauke Sandhaus";
pub const SYLLABUS: &[Section] = &[
    Section {
        heading: "Week 01: The Character of the Machine",
        bullets: &[
            "Historical context of the \"Designer-Developer\" split.",
            "Prompt-based creation and the \"Loss of Craft\" myth.",
            "Ethics of AI-human synergy in prototyping.",
        ],
        body: "",
    },
    Section {
        heading: "Project 01: The Moral Ledger",
        bullets: &[],
        body: "Students will build interactive data visualizations that reveal the \"hidden cost\" of everyday choices.",
    },
];
pub const SYLLABUS_QUOTE: &str = "\"We don't just write code anymore. We curate intentions.\"";

pub struct Reel {
    pub title: &'static str,
    pub author: &'static str,
    pub emoji: &'static str,
    pub likes: &'static str,
    pub comments: &'static str,
}

impl Reel {
    /// Avatar initials: the three characters after the handle's `@`.
    pub fn initials(&self) -> String {
        self.author
            .trim_start_matches('@')
            .chars()
            .take(3)
            .collect::<String>()
            .to_uppercase()
    }
}

pub const REELS: &[Reel] = &[
    Reel {
        title: "How to vibe code in 30s",
        author: "@hauke.haus",
        emoji: "🚀",
        likes: "2.4k",
        comments: "128",
    },
    Reel {
        title: "Why code needs values",
        author: "@ethic.vision",
        emoji: "⚖",
        likes: "2.4k",
        comments: "128",
    },
    Reel {
        title: "Summer 2026: Join the class!",
        author: "@cornell.tech",
        emoji: "🎓",
        likes: "2.4k",
        comments: "128",
    },
];
pub const REEL_TAGS: &[&str] = &["#vibecoding", "#ethics"];

pub struct ChecklistItem {
    pub label: &'static str,
    pub done: bool,
}

pub const NOTES_HEADER: &str = "Project Notes";
pub const NOTES_DATE: &str = "02/06/2026";
pub const NOTES_TITLE: &str = "The Moral Twist";
pub const NOTES_QUOTE: &str = "\"The designer's role is not to control every byte, but to set the character of the system. AI is the brush; ethics is the canvas.\"";
pub const NOTES_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "Validate Plagiarism vs Inspiration",
        done: false,
    },
    ChecklistItem {
        label: "Audit Vibe-Trace Accuracy",
        done: false,
    },
    ChecklistItem {
        label: "Implement Interactive Desk",
        done: true,
    },
];
pub const NOTES_FOOTER: &str =
    "* reminder: check the VAP framework document in the papers stack.";

pub const READING_TITLE: &str = "Values at Play in Digital Games";
pub const READING_AUTHORS: &str = "Mary Flanagan and Helen Nissenbaum";
pub const READING_BODY: &[&str] = &[
    "Values are not just added to technology; they are embedded within it. This core insight drives the \"Values at Play\" (VAP) framework, offering a systematic approach to identifying, negotiating, and implementing ethical values in game design.",
    "Designers must move beyond \"neutrality\" and recognize that every design choice, from mechanics to narrative to character representation, expresses a value system. The VAP framework empowers creators to make these choices intentional.",
];
pub const READING_HEURISTICS: &[(&str, &str)] = &[
    ("Discovery", "Translating values into design elements."),
    ("Translation", "Implement values via mechanics."),
    ("Verification", "resolving conflicts."),
];
pub const READING_LINKS: &[&str] = &[
    "Introduction to Values at Play",
    "Bias in Computer Systems (Friedman)",
    "Download Full Syllabus (PDF)",
];
pub const PITECH_BLURB: &str = "Explore how technology can serve the public good. Vibe Coding integrates these principles directly into the technical workflow.";
pub const PITECH_URL: &str = "https://pitechethics.github.io/";

pub struct Paper {
    pub title: &'static str,
    pub authors: &'static str,
    pub abstract_text: &'static str,
}

pub const SUGGESTED_READINGS: &[Paper] = &[
    Paper {
        title: "Bias in Computer Systems",
        authors: "Batya Friedman and Helen Nissenbaum (1996)",
        abstract_text: "ABSTRACT: From an analysis of bias in computer systems, we identify three categories: preexisting, technical, and emergent. Preexisting bias has its roots in social institutions, practices, and attitudes. Technical bias arises from technical constraints or considerations. Emergent bias arises in a context of use...",
    },
    Paper {
        title: "Value Sensitive Design",
        authors: "Batya Friedman et al.",
        abstract_text: "Value Sensitive Design (VSD) is a theoretically grounded approach to the design of technology that accounts for human values in a principled and comprehensive manner. Throughout the design process, VSD emphasizes the ethical import of design decisions...",
    },
];
pub const MORE_RESOURCES: (&str, &str) = ("More Resources", "Public Interest Tech");

/// Prefix of `text` revealed after `elapsed` seconds of typing.
pub fn typed_prefix(text: &str, elapsed: f32, interval: f32) -> &str {
    let shown = (elapsed.max(0.0) / interval).floor() as usize;
    match text.char_indices().nth(shown) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_reveals_one_char_per_interval() {
        assert_eq!(typed_prefix("abc", 0.0, 0.03), "");
        assert_eq!(typed_prefix("abc", 0.031, 0.03), "a");
        assert_eq!(typed_prefix("abc", 0.065, 0.03), "ab");
        assert_eq!(typed_prefix("abc", 10.0, 0.03), "abc");
    }

    #[test]
    fn typing_respects_char_boundaries() {
        assert_eq!(typed_prefix("é•x", 0.061, 0.03), "é•");
    }

    #[test]
    fn reel_initials() {
        assert_eq!(REELS[0].initials(), "HAU");
        assert_eq!(REELS[2].initials(), "COR");
    }
}
