//! The programming-language list exposed to every view.
//!
//! Used by the developers page for its language facets. Kept as data in
//! code rather than the database so views can rely on it without a query.

pub const ALL: &[&str] = &[
    "C",
    "C#",
    "C++",
    "Clojure",
    "CSS",
    "Elixir",
    "Erlang",
    "Go",
    "Haskell",
    "Java",
    "JavaScript",
    "Kotlin",
    "Objective-C",
    "Perl",
    "PHP",
    "Python",
    "Ruby",
    "Rust",
    "Scala",
    "SQL",
    "Swift",
    "TypeScript",
];
