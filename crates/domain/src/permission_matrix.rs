use serde::{Deserialize, Serialize};

use crate::capability::{
    Capability, EvaluationAction, ProcedureAction, StorageAction, SurveyAction, TemplateAction,
    UserAction,
};

/// Grants on exam definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SurveyGrants {
    pub create: bool,
    pub create_all: bool,
    pub create_professional: bool,
    pub read: bool,
    pub update: bool,
    pub duplicate: bool,
    pub delete: bool,
}

/// Grants on user accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct UserGrants {
    pub create_staff: bool,
    pub create_candidates: bool,
    pub invite: bool,
    pub remove: bool,
    pub update_role: bool,
}

/// Grants on procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ProcedureGrants {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub assign_staff: bool,
    pub manage_tests: bool,
    pub view_live_stats: bool,
    pub evaluate_candidates: bool,
    pub view_results: bool,
    pub view_test_errors: bool,
    pub finalize: bool,
    pub finalize_documentation: bool,
    pub import_share_point: bool,
}

/// Grants on exam templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TemplateGrants {
    pub create: bool,
    pub read: bool,
    pub provide: bool,
}

/// Grants on candidate documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StorageGrants {
    pub view: bool,
    pub upload: bool,
    pub delete: bool,
}

/// Grants on oral exam scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct EvaluationGrants {
    pub define_abilities: bool,
    pub define_questions: bool,
    pub assign_points: bool,
    pub finalize: bool,
}

/// Resource → action → grant table derived from a role.
///
/// Every resource and action is a named field, so an unset grant is `false`
/// rather than a missing key. Serializes to the nested
/// `{ "procedures": { "assignStaff": true, .. }, .. }` shape consumed by the
/// frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionMatrix {
    /// Exam definition grants.
    pub surveys: SurveyGrants,
    /// User account grants.
    pub users: UserGrants,
    /// Procedure grants.
    pub procedures: ProcedureGrants,
    /// Template grants.
    pub templates: TemplateGrants,
    /// Candidate document grants.
    pub storage: StorageGrants,
    /// Evaluation grants.
    pub evaluation: EvaluationGrants,
}

impl SurveyGrants {
    /// No survey grants.
    pub const NONE: Self = Self {
        create: false,
        create_all: false,
        create_professional: false,
        read: false,
        update: false,
        duplicate: false,
        delete: false,
    };
}

impl UserGrants {
    /// No user grants.
    pub const NONE: Self = Self {
        create_staff: false,
        create_candidates: false,
        invite: false,
        remove: false,
        update_role: false,
    };
}

impl ProcedureGrants {
    /// No procedure grants.
    pub const NONE: Self = Self {
        create: false,
        read: false,
        update: false,
        delete: false,
        assign_staff: false,
        manage_tests: false,
        view_live_stats: false,
        evaluate_candidates: false,
        view_results: false,
        view_test_errors: false,
        finalize: false,
        finalize_documentation: false,
        import_share_point: false,
    };
}

impl TemplateGrants {
    /// No template grants.
    pub const NONE: Self = Self {
        create: false,
        read: false,
        provide: false,
    };
}

impl StorageGrants {
    /// No storage grants.
    pub const NONE: Self = Self {
        view: false,
        upload: false,
        delete: false,
    };
}

impl EvaluationGrants {
    /// No evaluation grants.
    pub const NONE: Self = Self {
        define_abilities: false,
        define_questions: false,
        assign_points: false,
        finalize: false,
    };
}

impl PermissionMatrix {
    /// The empty matrix: every lookup is denied.
    pub const DENY_ALL: Self = Self {
        surveys: SurveyGrants::NONE,
        users: UserGrants::NONE,
        procedures: ProcedureGrants::NONE,
        templates: TemplateGrants::NONE,
        storage: StorageGrants::NONE,
        evaluation: EvaluationGrants::NONE,
    };

    /// Returns whether the matrix grants the capability.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Surveys(action) => {
                let grants = &self.surveys;
                match action {
                    SurveyAction::Create => grants.create,
                    SurveyAction::CreateAll => grants.create_all,
                    SurveyAction::CreateProfessional => grants.create_professional,
                    SurveyAction::Read => grants.read,
                    SurveyAction::Update => grants.update,
                    SurveyAction::Duplicate => grants.duplicate,
                    SurveyAction::Delete => grants.delete,
                }
            }
            Capability::Users(action) => {
                let grants = &self.users;
                match action {
                    UserAction::CreateStaff => grants.create_staff,
                    UserAction::CreateCandidates => grants.create_candidates,
                    UserAction::Invite => grants.invite,
                    UserAction::Remove => grants.remove,
                    UserAction::UpdateRole => grants.update_role,
                }
            }
            Capability::Procedures(action) => {
                let grants = &self.procedures;
                match action {
                    ProcedureAction::Create => grants.create,
                    ProcedureAction::Read => grants.read,
                    ProcedureAction::Update => grants.update,
                    ProcedureAction::Delete => grants.delete,
                    ProcedureAction::AssignStaff => grants.assign_staff,
                    ProcedureAction::ManageTests => grants.manage_tests,
                    ProcedureAction::ViewLiveStats => grants.view_live_stats,
                    ProcedureAction::EvaluateCandidates => grants.evaluate_candidates,
                    ProcedureAction::ViewResults => grants.view_results,
                    ProcedureAction::ViewTestErrors => grants.view_test_errors,
                    ProcedureAction::Finalize => grants.finalize,
                    ProcedureAction::FinalizeDocumentation => grants.finalize_documentation,
                    ProcedureAction::ImportSharePoint => grants.import_share_point,
                }
            }
            Capability::Templates(action) => {
                let grants = &self.templates;
                match action {
                    TemplateAction::Create => grants.create,
                    TemplateAction::Read => grants.read,
                    TemplateAction::Provide => grants.provide,
                }
            }
            Capability::Storage(action) => {
                let grants = &self.storage;
                match action {
                    StorageAction::View => grants.view,
                    StorageAction::Upload => grants.upload,
                    StorageAction::Delete => grants.delete,
                }
            }
            Capability::Evaluation(action) => {
                let grants = &self.evaluation;
                match action {
                    EvaluationAction::DefineAbilities => grants.define_abilities,
                    EvaluationAction::DefineQuestions => grants.define_questions,
                    EvaluationAction::AssignPoints => grants.assign_points,
                    EvaluationAction::Finalize => grants.finalize,
                }
            }
        }
    }

    /// Returns every capability granted by the matrix.
    #[must_use]
    pub fn granted(&self) -> Vec<Capability> {
        Capability::all()
            .into_iter()
            .filter(|capability| self.allows(*capability))
            .collect()
    }

    /// Returns whether no capability is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::DENY_ALL
    }
}
