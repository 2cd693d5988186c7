/// Canonical role names, in match priority order. Reordering this list
/// changes which role term a title earns.
pub const CANONICAL_ROLES: &[&str] = &[
    "Software Engineer",
    "Backend Developer",
    "Frontend Developer",
    "Full Stack Developer",
    "Mobile Developer",
    "Data Scientist",
    "Data Engineer",
    "Data Analyst",
    "Machine Learning Engineer",
    "DevOps Engineer",
    "Site Reliability Engineer",
    "Security Engineer",
    "QA Engineer",
    "Product Manager",
    "Product Designer",
    "Research Scientist",
    "Solutions Architect",
    "Technical Program Manager",
];

/// First canonical role whose lowercase name occurs in `text`.
pub fn match_canonical_role(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    CANONICAL_ROLES
        .iter()
        .copied()
        .find(|role| text.contains(&role.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(
            match_canonical_role("senior BACKEND developer, payments"),
            Some("Backend Developer")
        );
    }

    #[test]
    fn test_first_match_in_list_order_wins() {
        // Contains both "Software Engineer" and "Machine Learning Engineer".
        assert_eq!(
            match_canonical_role("Machine Learning Engineer / Software Engineer"),
            Some("Software Engineer")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_canonical_role("Account Executive"), None);
        assert_eq!(match_canonical_role(""), None);
    }
}
