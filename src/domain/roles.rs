//! Role types and the fixed lookup lists a role can reference

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    CabinetMinister,
    Minister,
    PermanentSecretary,
    BoardMember,
    ChiefProfessionalOfficer,
    Military,
    SpecialRepresentative,
    TrafficCommissioner,
    ChiefScientificAdvisor,
    WorldwideOfficeStaff,
    Judge,
}

pub const MINISTERIAL_ROLE: &str = "MinisterialRole";

impl RoleType {
    pub const ALL: [RoleType; 11] = [
        RoleType::CabinetMinister,
        RoleType::Minister,
        RoleType::PermanentSecretary,
        RoleType::BoardMember,
        RoleType::ChiefProfessionalOfficer,
        RoleType::Military,
        RoleType::SpecialRepresentative,
        RoleType::TrafficCommissioner,
        RoleType::ChiefScientificAdvisor,
        RoleType::WorldwideOfficeStaff,
        RoleType::Judge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::CabinetMinister => "cabinet_minister",
            RoleType::Minister => "minister",
            RoleType::PermanentSecretary => "permanent_secretary",
            RoleType::BoardMember => "board_member",
            RoleType::ChiefProfessionalOfficer => "chief_professional_officer",
            RoleType::Military => "military",
            RoleType::SpecialRepresentative => "special_representative",
            RoleType::TrafficCommissioner => "traffic_commissioner",
            RoleType::ChiefScientificAdvisor => "chief_scientific_advisor",
            RoleType::WorldwideOfficeStaff => "worldwide_office_staff",
            RoleType::Judge => "judge",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleType::CabinetMinister => "Cabinet minister",
            RoleType::Minister => "Minister",
            RoleType::PermanentSecretary => "Permanent secretary",
            RoleType::BoardMember => "Board member",
            RoleType::ChiefProfessionalOfficer => "Chief professional officer",
            RoleType::Military => "Military",
            RoleType::SpecialRepresentative => "Special representative",
            RoleType::TrafficCommissioner => "Traffic commissioner",
            RoleType::ChiefScientificAdvisor => "Chief scientific advisor",
            RoleType::WorldwideOfficeStaff => "Worldwide office staff",
            RoleType::Judge => "Judge",
        }
    }

    /// The persisted role class. Several editor-facing types share one class
    /// and are told apart by the `permanent_secretary` / `cabinet_member` flags.
    pub fn kind(self) -> &'static str {
        match self {
            RoleType::CabinetMinister | RoleType::Minister => MINISTERIAL_ROLE,
            RoleType::PermanentSecretary | RoleType::BoardMember => "BoardMemberRole",
            RoleType::ChiefProfessionalOfficer => "ChiefProfessionalOfficerRole",
            RoleType::Military => "MilitaryRole",
            RoleType::SpecialRepresentative => "SpecialRepresentativeRole",
            RoleType::TrafficCommissioner => "TrafficCommissionerRole",
            RoleType::ChiefScientificAdvisor => "ChiefScientificAdvisorRole",
            RoleType::WorldwideOfficeStaff => "WorldwideOfficeStaffRole",
            RoleType::Judge => "JudgeRole",
        }
    }

    pub fn is_ministerial(self) -> bool {
        self.kind() == MINISTERIAL_ROLE
    }

    pub fn permanent_secretary(self) -> bool {
        self == RoleType::PermanentSecretary
    }

    pub fn cabinet_member(self) -> bool {
        self == RoleType::CabinetMinister
    }
}

/// An entry in one of the fixed id/name lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub id: i32,
    pub name: &'static str,
}

const fn lookup(id: i32, name: &'static str) -> Lookup {
    Lookup { id, name }
}

pub const WHIP_ORGANISATIONS: &[Lookup] = &[
    lookup(1, "House of Commons"),
    lookup(2, "House of Lords"),
    lookup(3, "Junior Lords of the Treasury"),
    lookup(4, "Assistant Whips"),
    lookup(5, "Baronesses and Lords in Waiting"),
];

pub const ROLE_PAYMENT_TYPES: &[Lookup] = &[
    lookup(1, "Unpaid"),
    lookup(2, "Parliamentary Secretary"),
    lookup(3, "Paid as a whip"),
    lookup(4, "Paid as a Parliamentary Secretary"),
];

pub const ATTENDS_CABINET_TYPES: &[Lookup] = &[
    lookup(1, "Attends Cabinet"),
    lookup(
        2,
        "Attends Cabinet when Ministerial responsibilities are on the agenda",
    ),
];

pub fn find_lookup(list: &[Lookup], id: i32) -> Option<Lookup> {
    list.iter().copied().find(|l| l.id == id)
}
