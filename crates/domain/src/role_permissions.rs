//! Static role → permission table.
//!
//! `procedures.finalize` (closing the whole procedure) belongs to admin only,
//! while `evaluation.finalize` (closing oral exam scoring) is also granted to
//! the commission chair. The two must stay separate grants.

use crate::permission_matrix::{
    EvaluationGrants, PermissionMatrix, ProcedureGrants, StorageGrants, SurveyGrants,
    TemplateGrants, UserGrants,
};

pub(crate) const ADMIN: PermissionMatrix = PermissionMatrix {
    surveys: SurveyGrants {
        create: true,
        create_all: true,
        create_professional: true,
        read: true,
        update: true,
        duplicate: true,
        delete: true,
    },
    users: UserGrants {
        create_staff: true,
        create_candidates: true,
        invite: true,
        remove: true,
        update_role: true,
    },
    procedures: ProcedureGrants {
        create: true,
        read: true,
        update: true,
        delete: true,
        assign_staff: true,
        manage_tests: true,
        view_live_stats: true,
        evaluate_candidates: true,
        view_results: true,
        view_test_errors: true,
        finalize: true,
        finalize_documentation: true,
        import_share_point: true,
    },
    templates: TemplateGrants {
        create: true,
        read: true,
        provide: true,
    },
    storage: StorageGrants {
        view: true,
        upload: true,
        delete: true,
    },
    evaluation: EvaluationGrants {
        define_abilities: true,
        define_questions: true,
        assign_points: true,
        finalize: true,
    },
};

// Professional knowledge exams only, built from provided templates.
pub(crate) const SUBJECT_EXPERT: PermissionMatrix = PermissionMatrix {
    surveys: SurveyGrants {
        create_professional: true,
        read: true,
        update: true,
        duplicate: true,
        ..SurveyGrants::NONE
    },
    users: UserGrants::NONE,
    procedures: ProcedureGrants {
        read: true,
        ..ProcedureGrants::NONE
    },
    templates: TemplateGrants {
        read: true,
        ..TemplateGrants::NONE
    },
    storage: StorageGrants::NONE,
    evaluation: EvaluationGrants::NONE,
};

pub(crate) const COMMISSION_CHAIR: PermissionMatrix = PermissionMatrix {
    surveys: SurveyGrants {
        read: true,
        ..SurveyGrants::NONE
    },
    users: UserGrants::NONE,
    procedures: ProcedureGrants {
        read: true,
        evaluate_candidates: true,
        view_results: true,
        view_test_errors: true,
        ..ProcedureGrants::NONE
    },
    templates: TemplateGrants::NONE,
    storage: StorageGrants {
        view: true,
        ..StorageGrants::NONE
    },
    evaluation: EvaluationGrants {
        assign_points: true,
        finalize: true,
        ..EvaluationGrants::NONE
    },
};

pub(crate) const COMMISSION_MEMBER: PermissionMatrix = PermissionMatrix {
    evaluation: EvaluationGrants {
        assign_points: true,
        ..EvaluationGrants::NONE
    },
    ..COMMISSION_CHAIR
};

// Own procedure and own results only.
pub(crate) const CANDIDATE: PermissionMatrix = PermissionMatrix {
    surveys: SurveyGrants {
        read: true,
        ..SurveyGrants::NONE
    },
    users: UserGrants::NONE,
    procedures: ProcedureGrants {
        read: true,
        view_results: true,
        ..ProcedureGrants::NONE
    },
    templates: TemplateGrants::NONE,
    storage: StorageGrants::NONE,
    evaluation: EvaluationGrants::NONE,
};

// Access comes only through procedure assignments.
pub(crate) const MEMBER: PermissionMatrix = PermissionMatrix::DENY_ALL;
