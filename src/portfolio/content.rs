/// A résumé section, one per clickable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Education,
    Work,
    Skills,
    Projects,
    Connect,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ContentEntry {
    pub title: &'static str,
    pub text: &'static str,
}

const ABOUT: ContentEntry = ContentEntry {
    title: "About Me",
    text: "Aaron Lad: Ambitious CS student at UofA. Passionate about end-to-end product building, technical execution, and UX strategy.",
};

const EDUCATION: ContentEntry = ContentEntry {
    title: "Education & Certifications",
    text: "BSc in Computing Science (Economics Minor) at University of Alberta. Certifications from Coursera: Management Skills (UofLondon), Marketing Mix (IE University), Python Programming (Rice), Strategic Management (Copenhagen Business School).",
};

const WORK: ContentEntry = ContentEntry {
    title: "Work Experience",
    text: "Partner & Head of Web Development at Unconventional Media (Led 10+ business projects). Line Cook at Earls Kitchen + Bar (Workflow optimization). Associate at Hydrotec International.",
};

const SKILLS: ContentEntry = ContentEntry {
    title: "Skills & Hobbies",
    text: "Technical Skills: Python, JS, HTML/CSS, Git, Streamlit, AI/ML Prototyping. Interests: Economics, Finance, Product Design, Content Creation, Cooking, Sports.",
};

const PROJECTS: ContentEntry = ContentEntry {
    title: "Projects",
    text: "Algorithm Visual Playground, Gitabot (Bhagavad Gita AI), AI Text-to-Audio Tool, ASL Learning Prototype, AI YouTube Channel (30k+ views).",
};

const CONNECT: ContentEntry = ContentEntry {
    title: "Connect",
    text: "LinkedIn | GitHub | Email: ladaaron15@gmail.com",
};

impl Section {
    pub const ALL: [Section; 6] = [
        Section::About,
        Section::Education,
        Section::Work,
        Section::Skills,
        Section::Projects,
        Section::Connect,
    ];

    pub fn entry(self) -> &'static ContentEntry {
        match self {
            Section::About => &ABOUT,
            Section::Education => &EDUCATION,
            Section::Work => &WORK,
            Section::Skills => &SKILLS,
            Section::Projects => &PROJECTS,
            Section::Connect => &CONNECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn about_is_titled_about_me() {
        assert_eq!(Section::About.entry().title, "About Me");
    }

    #[test]
    fn every_section_has_distinct_text() {
        let titles: HashSet<_> = Section::ALL.iter().map(|s| s.entry().title).collect();
        assert_eq!(titles.len(), Section::ALL.len());
        assert!(Section::ALL.iter().all(|s| !s.entry().text.is_empty()));
    }
}
