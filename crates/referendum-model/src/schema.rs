//! Column names for source and derived tables.

// === Referendum source ===

/// Department code as exported with the referendum results (may be unpadded).
pub const DEPARTMENT_CODE: &str = "Department code";
pub const REGISTERED: &str = "Registered";
pub const ABSTENTIONS: &str = "Abstentions";
pub const NULL_BALLOTS: &str = "Null";
pub const CHOICE_A: &str = "Choice A";
pub const CHOICE_B: &str = "Choice B";

/// Vote-count columns, summed per region by the aggregator.
pub const VOTE_COLUMNS: [&str; 5] = [REGISTERED, ABSTENTIONS, NULL_BALLOTS, CHOICE_A, CHOICE_B];

/// Columns the referendum source must provide.
pub const REFERENDUM_COLUMNS: [&str; 6] = [
    DEPARTMENT_CODE,
    REGISTERED,
    ABSTENTIONS,
    NULL_BALLOTS,
    CHOICE_A,
    CHOICE_B,
];

// === Reference sources ===

/// Shared by the regions and departments tables.
pub const SOURCE_CODE: &str = "code";
/// Shared by the regions and departments tables.
pub const SOURCE_NAME: &str = "name";
/// Foreign key from a department to its region.
pub const SOURCE_REGION_CODE: &str = "region_code";

pub const REGION_COLUMNS: [&str; 2] = [SOURCE_CODE, SOURCE_NAME];
pub const DEPARTMENT_COLUMNS: [&str; 3] = [SOURCE_CODE, SOURCE_NAME, SOURCE_REGION_CODE];

// === Area lookup (canonical) ===

pub const CODE_REG: &str = "code_reg";
pub const NAME_REG: &str = "name_reg";
pub const CODE_DEP: &str = "code_dep";
pub const NAME_DEP: &str = "name_dep";

/// Canonical area lookup columns, in output order.
pub const AREA_COLUMNS: [&str; 4] = [CODE_REG, NAME_REG, CODE_DEP, NAME_DEP];

// === Map ===

/// Region name property in the geometry source.
pub const GEOMETRY_NAME: &str = "nom";
/// Derived `Choice A / (Choice A + Choice B)` column.
pub const RATIO: &str = "ratio";
