// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::ProjectId;
use crate::model::Project;
use crate::validate::{NameError, validate_name};

/// The one in-flight rename, when any. The store keeps the old name until
/// the session commits; the draft lives only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: ProjectId,
    pub draft: String,
    pub error: Option<NameError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectList {
    projects: Vec<Project>,
    session: Option<EditSession>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    StartEdit(ProjectId),
    ChangeDraft(String),
    Commit,
    Blur,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    EditStarted(ProjectId),
    DraftChanged(Option<NameError>),
    NameCommitted { id: ProjectId, name: String },
    CommitBlocked(NameError),
    BlurSkipped,
    EditCanceled(ProjectId),
    EditUnavailable,
}

impl ProjectList {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            session: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn dispatch(&mut self, command: ListCommand) -> Vec<ListEvent> {
        match command {
            ListCommand::StartEdit(id) => self.start_edit(id),
            ListCommand::ChangeDraft(draft) => self.change_draft(draft),
            ListCommand::Commit => self.commit(),
            ListCommand::Blur => self.blur(),
            ListCommand::Cancel => self.cancel(),
        }
    }

    /// Guard: only one session at a time. A start request while another
    /// rename is open (or for an unknown id) is refused, not queued.
    fn start_edit(&mut self, id: ProjectId) -> Vec<ListEvent> {
        if self.session.is_some() {
            return vec![ListEvent::EditUnavailable];
        }
        let Some(project) = self.projects.iter().find(|project| project.id == id) else {
            return vec![ListEvent::EditUnavailable];
        };
        self.session = Some(EditSession {
            target: id,
            draft: project.name.clone(),
            error: None,
        });
        vec![ListEvent::EditStarted(id)]
    }

    /// Real-time feedback transition: every keystroke re-runs validation
    /// against the live store, excluding the target itself. Never commits.
    fn change_draft(&mut self, draft: String) -> Vec<ListEvent> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.draft = draft;
        session.error = validate_name(&session.draft, &self.projects, Some(session.target)).err();
        vec![ListEvent::DraftChanged(session.error)]
    }

    fn commit(&mut self) -> Vec<ListEvent> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let target = session.target;
        match validate_name(&session.draft, &self.projects, Some(target)) {
            Ok(name) => {
                if let Some(project) = self
                    .projects
                    .iter_mut()
                    .find(|project| project.id == target)
                {
                    project.name = name.clone();
                }
                self.session = None;
                vec![ListEvent::NameCommitted { id: target, name }]
            }
            Err(error) => {
                if let Some(session) = self.session.as_mut() {
                    session.error = Some(error);
                }
                vec![ListEvent::CommitBlocked(error)]
            }
        }
    }

    /// Focus loss commits only when no error is on display; with an error
    /// showing, the attempt is skipped outright rather than re-validated.
    fn blur(&mut self) -> Vec<ListEvent> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        if session.error.is_some() {
            return vec![ListEvent::BlurSkipped];
        }
        self.commit()
    }

    fn cancel(&mut self) -> Vec<ListEvent> {
        match self.session.take() {
            Some(session) => vec![ListEvent::EditCanceled(session.target)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListCommand, ListEvent, ProjectList};
    use crate::ids::ProjectId;
    use crate::model::seed_projects;
    use crate::validate::NameError;

    fn sample_list() -> ProjectList {
        ProjectList::new(seed_projects([
            "Website Redesign",
            "Marketing Q3",
            "Mobile App",
        ]))
    }

    fn names(list: &ProjectList) -> Vec<&str> {
        list.projects()
            .iter()
            .map(|project| project.name.as_str())
            .collect()
    }

    #[test]
    fn start_edit_seeds_draft_from_current_name_with_no_error() {
        let mut list = sample_list();
        let events = list.dispatch(ListCommand::StartEdit(ProjectId::new(2)));
        assert_eq!(events, vec![ListEvent::EditStarted(ProjectId::new(2))]);

        let session = list.session().expect("session open");
        assert_eq!(session.target, ProjectId::new(2));
        assert_eq!(session.draft, "Marketing Q3");
        assert_eq!(session.error, None);
    }

    #[test]
    fn start_edit_is_refused_while_another_session_is_open() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(1)));

        let events = list.dispatch(ListCommand::StartEdit(ProjectId::new(2)));
        assert_eq!(events, vec![ListEvent::EditUnavailable]);
        assert_eq!(
            list.session().expect("first session intact").target,
            ProjectId::new(1)
        );
    }

    #[test]
    fn start_edit_is_refused_for_unknown_id() {
        let mut list = sample_list();
        let events = list.dispatch(ListCommand::StartEdit(ProjectId::new(99)));
        assert_eq!(events, vec![ListEvent::EditUnavailable]);
        assert!(list.session().is_none());
    }

    #[test]
    fn draft_change_revalidates_without_touching_the_store() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(2)));

        let events = list.dispatch(ListCommand::ChangeDraft("Website Redesign".to_owned()));
        assert_eq!(
            events,
            vec![ListEvent::DraftChanged(Some(NameError::Duplicate))]
        );
        assert_eq!(
            list.session().expect("session open").error,
            Some(NameError::Duplicate)
        );
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn commit_trims_and_applies_the_draft_then_clears_the_session() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(2)));
        list.dispatch(ListCommand::ChangeDraft("Website Redesign".to_owned()));
        let events = list.dispatch(ListCommand::ChangeDraft("  Marketing Q4  ".to_owned()));
        assert_eq!(events, vec![ListEvent::DraftChanged(None)]);

        let events = list.dispatch(ListCommand::Commit);
        assert_eq!(
            events,
            vec![ListEvent::NameCommitted {
                id: ProjectId::new(2),
                name: "Marketing Q4".to_owned(),
            }]
        );
        assert!(list.session().is_none());
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q4", "Mobile App"]);
    }

    #[test]
    fn commit_of_invalid_draft_keeps_the_session_open_with_the_error() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(2)));
        list.dispatch(ListCommand::ChangeDraft("mobile app".to_owned()));

        let events = list.dispatch(ListCommand::Commit);
        assert_eq!(events, vec![ListEvent::CommitBlocked(NameError::Duplicate)]);

        let session = list.session().expect("session still open");
        assert_eq!(session.draft, "mobile app");
        assert_eq!(session.error, Some(NameError::Duplicate));
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn committing_the_unchanged_name_is_a_no_op_rename() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(3)));

        let events = list.dispatch(ListCommand::Commit);
        assert_eq!(
            events,
            vec![ListEvent::NameCommitted {
                id: ProjectId::new(3),
                name: "Mobile App".to_owned(),
            }]
        );
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn cancel_discards_the_draft_and_leaves_the_store_untouched() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(1)));
        let events = list.dispatch(ListCommand::ChangeDraft(String::new()));
        assert_eq!(events, vec![ListEvent::DraftChanged(Some(NameError::Empty))]);

        let events = list.dispatch(ListCommand::Cancel);
        assert_eq!(events, vec![ListEvent::EditCanceled(ProjectId::new(1))]);
        assert!(list.session().is_none());
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn blur_is_skipped_while_an_error_is_on_display() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(3)));
        list.dispatch(ListCommand::ChangeDraft("   ".to_owned()));

        let events = list.dispatch(ListCommand::Blur);
        assert_eq!(events, vec![ListEvent::BlurSkipped]);

        let session = list.session().expect("session survives the blur");
        assert_eq!(session.error, Some(NameError::Empty));
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn blur_commits_when_no_error_is_on_display() {
        let mut list = sample_list();
        list.dispatch(ListCommand::StartEdit(ProjectId::new(3)));
        list.dispatch(ListCommand::ChangeDraft("Mobile App v2".to_owned()));

        let events = list.dispatch(ListCommand::Blur);
        assert_eq!(
            events,
            vec![ListEvent::NameCommitted {
                id: ProjectId::new(3),
                name: "Mobile App v2".to_owned(),
            }]
        );
        assert!(list.session().is_none());
        assert_eq!(
            names(&list),
            ["Website Redesign", "Marketing Q3", "Mobile App v2"]
        );
    }

    #[test]
    fn commands_without_a_session_are_silent_no_ops() {
        let mut list = sample_list();
        assert!(list.dispatch(ListCommand::ChangeDraft("x".to_owned())).is_empty());
        assert!(list.dispatch(ListCommand::Commit).is_empty());
        assert!(list.dispatch(ListCommand::Blur).is_empty());
        assert!(list.dispatch(ListCommand::Cancel).is_empty());
        assert_eq!(names(&list), ["Website Redesign", "Marketing Q3", "Mobile App"]);
    }

    #[test]
    fn edit_on_a_duplicate_seed_blocks_blur_commit_of_the_unchanged_name() {
        // A seed with pre-existing duplicates is accepted as-is; uniqueness
        // is only enforced once a rename tries to land.
        let mut list = ProjectList::new(seed_projects(["Alpha", "Alpha"]));
        list.dispatch(ListCommand::StartEdit(ProjectId::new(1)));

        // The session opens clean, so a blur goes through to validation and
        // gets blocked there.
        let events = list.dispatch(ListCommand::Blur);
        assert_eq!(events, vec![ListEvent::CommitBlocked(NameError::Duplicate)]);
        assert!(list.session().is_some());
        assert_eq!(names(&list), ["Alpha", "Alpha"]);
    }
}
