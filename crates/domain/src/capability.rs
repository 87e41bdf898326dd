use std::fmt::{Display, Formatter};
use std::str::FromStr;

use examboard_core::AppError;
use serde::{Deserialize, Serialize};

/// Resource families guarded by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Written and oral exam definitions.
    Surveys,
    /// Staff and candidate accounts.
    Users,
    /// Hiring rounds and their lifecycle.
    Procedures,
    /// Exam templates handed to subject experts.
    Templates,
    /// Candidate documents in the object store.
    Storage,
    /// Oral exam scoring.
    Evaluation,
}

impl Resource {
    /// Returns the stable transport value for this resource.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surveys => "surveys",
            Self::Users => "users",
            Self::Procedures => "procedures",
            Self::Templates => "templates",
            Self::Storage => "storage",
            Self::Evaluation => "evaluation",
        }
    }

    /// Returns all known resources.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Resource] = &[
            Resource::Surveys,
            Resource::Users,
            Resource::Procedures,
            Resource::Templates,
            Resource::Storage,
            Resource::Evaluation,
        ];

        ALL
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown resource '{value}'")))
    }
}

impl Display for Resource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

macro_rules! resource_actions {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl $name {
            /// Returns the camelCase action name used on the wire.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Returns every action of this resource.
            #[must_use]
            pub fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }

            fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

resource_actions!(
    /// Actions on exam definitions.
    SurveyAction {
        /// Create exams of any kind.
        Create => "create",
        /// Create every exam category.
        CreateAll => "createAll",
        /// Create professional knowledge exams only.
        CreateProfessional => "createProfessional",
        /// Read exams.
        Read => "read",
        /// Edit exams.
        Update => "update",
        /// Duplicate an exam.
        Duplicate => "duplicate",
        /// Delete exams.
        Delete => "delete",
    }
);

resource_actions!(
    /// Actions on user accounts.
    UserAction {
        /// Create subject expert and commission accounts.
        CreateStaff => "createStaff",
        /// Create candidate accounts.
        CreateCandidates => "createCandidates",
        /// Invite users into the organization.
        Invite => "invite",
        /// Remove organization members.
        Remove => "remove",
        /// Change a member's organization role.
        UpdateRole => "updateRole",
    }
);

resource_actions!(
    /// Actions on procedures.
    ProcedureAction {
        /// Create a procedure with its predefined header.
        Create => "create",
        /// View procedures.
        Read => "read",
        /// Edit procedures.
        Update => "update",
        /// Delete procedures.
        Delete => "delete",
        /// Assign staff to a procedure.
        AssignStaff => "assignStaff",
        /// Assign exams and set their conditions.
        ManageTests => "manageTests",
        /// Watch candidate counts, timers and interim results.
        ViewLiveStats => "viewLiveStats",
        /// Evaluate candidates.
        EvaluateCandidates => "evaluateCandidates",
        /// View results.
        ViewResults => "viewResults",
        /// Inspect individual exam errors.
        ViewTestErrors => "viewTestErrors",
        /// Close the procedure.
        Finalize => "finalize",
        /// Export and send the closing documentation.
        FinalizeDocumentation => "finalizeDocumentation",
        /// Import documents from SharePoint.
        ImportSharePoint => "importSharePoint",
    }
);

resource_actions!(
    /// Actions on exam templates.
    TemplateAction {
        /// Create templates.
        Create => "create",
        /// Read templates.
        Read => "read",
        /// Hand templates to subject experts.
        Provide => "provide",
    }
);

resource_actions!(
    /// Actions on candidate documents.
    StorageAction {
        /// View candidate documents.
        View => "view",
        /// Upload documents.
        Upload => "upload",
        /// Delete documents.
        Delete => "delete",
    }
);

resource_actions!(
    /// Actions on oral exam scoring.
    EvaluationAction {
        /// Predefine abilities and personality traits.
        DefineAbilities => "defineAbilities",
        /// Select questions from the question bank.
        DefineQuestions => "defineQuestions",
        /// Award points during evaluation.
        AssignPoints => "assignPoints",
        /// Close oral exam scoring.
        Finalize => "finalize",
    }
);

/// A single `resource.action` grant checked by the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Exam definition action.
    Surveys(SurveyAction),
    /// User account action.
    Users(UserAction),
    /// Procedure action.
    Procedures(ProcedureAction),
    /// Template action.
    Templates(TemplateAction),
    /// Candidate document action.
    Storage(StorageAction),
    /// Evaluation action.
    Evaluation(EvaluationAction),
}

impl Capability {
    /// Parses a capability from separate resource and action transport values.
    pub fn parse(resource: &str, action: &str) -> Result<Self, AppError> {
        let resource = Resource::from_str(resource)?;
        let capability = match resource {
            Resource::Surveys => SurveyAction::parse(action).map(Self::Surveys),
            Resource::Users => UserAction::parse(action).map(Self::Users),
            Resource::Procedures => ProcedureAction::parse(action).map(Self::Procedures),
            Resource::Templates => TemplateAction::parse(action).map(Self::Templates),
            Resource::Storage => StorageAction::parse(action).map(Self::Storage),
            Resource::Evaluation => EvaluationAction::parse(action).map(Self::Evaluation),
        };

        capability.ok_or_else(|| {
            AppError::Validation(format!(
                "unknown action '{action}' for resource '{}'",
                resource.as_str()
            ))
        })
    }

    /// Returns the resource family of this capability.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Surveys(_) => Resource::Surveys,
            Self::Users(_) => Resource::Users,
            Self::Procedures(_) => Resource::Procedures,
            Self::Templates(_) => Resource::Templates,
            Self::Storage(_) => Resource::Storage,
            Self::Evaluation(_) => Resource::Evaluation,
        }
    }

    /// Returns the action name within the resource family.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Surveys(action) => action.as_str(),
            Self::Users(action) => action.as_str(),
            Self::Procedures(action) => action.as_str(),
            Self::Templates(action) => action.as_str(),
            Self::Storage(action) => action.as_str(),
            Self::Evaluation(action) => action.as_str(),
        }
    }

    /// Returns every capability the matrix can express.
    #[must_use]
    pub fn all() -> Vec<Self> {
        SurveyAction::all()
            .iter()
            .copied()
            .map(Self::Surveys)
            .chain(UserAction::all().iter().copied().map(Self::Users))
            .chain(ProcedureAction::all().iter().copied().map(Self::Procedures))
            .chain(TemplateAction::all().iter().copied().map(Self::Templates))
            .chain(StorageAction::all().iter().copied().map(Self::Storage))
            .chain(EvaluationAction::all().iter().copied().map(Self::Evaluation))
            .collect()
    }
}

impl Display for Capability {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}.{}", self.resource().as_str(), self.action())
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (resource, action) = value.split_once('.').ok_or_else(|| {
            AppError::Validation(format!(
                "capability '{value}' must have the form 'resource.action'"
            ))
        })?;

        Self::parse(resource, action)
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(value.as_str()).map_err(serde::de::Error::custom)
    }
}
