//! Sample data for the editor's "load sample data" action and for previews.

use serde_json::json;

use crate::document::model::ResumeDocument;
use crate::document::normalize::normalize;

pub fn sample_document() -> ResumeDocument {
    let raw = json!({
        "profile": {
            "fullName": "John Doe",
            "designation": "Senior Software Engineer",
            "summary": "Passionate and results-driven developer with 6+ years of experience building full-stack web applications."
        },
        "contact": {
            "email": "john.doe@example.com",
            "phone": "+1234567890",
            "location": "#12 Anywhere, Any City, Any Country",
            "linkedin": "https://linkedin.com/in/johndoe",
            "github": "https://github.com/johndoe",
            "website": "https://johndoe.dev"
        },
        "workExperience": [
            {
                "company": "Tech Solutions",
                "role": "Senior Frontend Engineer",
                "startDate": "2022-03",
                "endDate": "2025-04",
                "description": "Leading the frontend team to build scalable enterprise applications.\nIntroduced a typed component library used by 6 product teams.\nCut bundle size by 35% through route-level code splitting."
            },
            {
                "company": "Coding Dev",
                "role": "Full Stack Developer",
                "startDate": "2020-01",
                "endDate": "2022-02",
                "description": "Worked on cross-functional teams developing full-stack solutions.\nOwned the billing service end to end."
            },
            {
                "company": "Startup Company",
                "role": "Junior Web Developer",
                "startDate": "2018-06",
                "endDate": "2019-12",
                "description": "Built responsive websites for startups and small businesses."
            }
        ],
        "education": [
            {
                "degree": "M.Sc. Software Engineering",
                "institution": "Tech University",
                "startDate": "2021-08",
                "endDate": "2023-06"
            },
            {
                "degree": "B.Sc. Computer Science",
                "institution": "State University",
                "startDate": "2017-08",
                "endDate": "2021-07"
            }
        ],
        "skills": [
            {"name": "JavaScript", "proficiency": 95},
            {"name": "React", "proficiency": 90},
            {"name": "Node.js", "proficiency": 85},
            {"name": "TypeScript", "proficiency": 80},
            {"name": "MongoDB", "proficiency": 75}
        ],
        "projects": [
            {
                "title": "Project Manager App",
                "description": "A task and team management app with role-based access and timelines.",
                "github": "https://github.com/johndoe/project-manager-app"
            },
            {
                "title": "E-Commerce Platform",
                "description": "Storefront with cart, checkout and an admin dashboard.",
                "liveDemo": "https://shop.johndoe.dev"
            }
        ],
        "certifications": [
            {"title": "React Advanced Certification", "issuer": "Coursera", "year": "2022"}
        ],
        "languages": [
            {"name": "English", "proficiency": 100},
            {"name": "Spanish", "proficiency": 70},
            {"name": "French", "proficiency": 40}
        ],
        "interests": ["Reading", "Open Source Contribution", "Hiking"],
        "template": {"themeId": "01", "colorPaletteIndex": 0}
    });

    // Well-formed literal; the default is never reached.
    normalize(&raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::section::SectionKind;

    #[test]
    fn test_sample_populates_every_section() {
        let doc = sample_document();
        assert_eq!(doc.profile.full_name, "John Doe");
        for kind in SectionKind::ALL {
            assert!(doc.has_section(kind), "sample should fill {kind:?}");
        }
    }
}
