// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use proyectos_app::{Project, seed_projects};

/// The canonical starter trio, used whenever no seed list is configured.
pub const SEED_TRIO: [&str; 3] = ["Website Redesign", "Marketing Q3", "Mobile App"];

const PROJECT_AREAS: [&str; 8] = [
    "Onboarding",
    "Billing",
    "Analytics",
    "Search",
    "Checkout",
    "Docs",
    "Infra",
    "Support",
];

const PROJECT_PHASES: [&str; 5] = ["Revamp", "Audit", "Migration", "Launch", "Cleanup"];

/// Deterministic list of distinct demo project names. The trio comes first
/// so the demo screen matches the documented walkthrough; the rest are
/// area/phase combinations in a fixed order.
pub fn demo_project_names(count: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(count);
    for name in SEED_TRIO {
        if names.len() == count {
            return names;
        }
        names.push(name.to_owned());
    }

    'outer: for (index, phase) in PROJECT_PHASES.iter().enumerate() {
        for offset in 0..PROJECT_AREAS.len() {
            if names.len() == count {
                break 'outer;
            }
            // Rotate the area list per phase so neighbors read less uniform.
            let area = PROJECT_AREAS[(offset + index * 3) % PROJECT_AREAS.len()];
            names.push(format!("{area} {phase}"));
        }
    }

    names
}

pub fn demo_projects(count: usize) -> Vec<Project> {
    seed_projects(demo_project_names(count))
}

#[cfg(test)]
mod tests {
    use super::{SEED_TRIO, demo_project_names, demo_projects};
    use proyectos_app::validate_name;

    #[test]
    fn demo_names_start_with_the_seed_trio() {
        let names = demo_project_names(5);
        assert_eq!(&names[..3], &SEED_TRIO.map(String::from));
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn demo_names_are_deterministic() {
        assert_eq!(demo_project_names(20), demo_project_names(20));
    }

    #[test]
    fn demo_projects_satisfy_the_store_uniqueness_invariant() {
        let projects = demo_projects(40);
        for project in &projects {
            assert_eq!(
                validate_name(&project.name, &projects, Some(project.id)),
                Ok(project.name.clone()),
                "demo name {:?} must be unique and non-empty",
                project.name
            );
        }
    }

    #[test]
    fn short_requests_truncate_the_trio() {
        assert_eq!(demo_project_names(1), vec!["Website Redesign".to_owned()]);
        assert!(demo_project_names(0).is_empty());
    }
}
