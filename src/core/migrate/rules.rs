//! Static rename tables for the 1.x → 2.0 migration.
//!
//! Order inside each table is part of the contract: rules run one after the
//! other against the accumulating name, so a later rule may match text that
//! an earlier rule produced (`hmm_mat4` → `HMM_mat4` → `HMM_Mat4`).

use serde::Serialize;

use super::diagnostics::WarningKind;

/// Prefix of 1.x type identifiers (`hmm_vec3`).
pub const OLD_PREFIX: &str = "hmm_";

/// Prefix of function identifiers in both versions, and of 2.0 types.
pub const NEW_PREFIX: &str = "HMM_";

/// What happens besides the substring replacement when a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleEffect {
    None,
    /// Emit a warning alongside the rename.
    Notice {
        kind: WarningKind,
        message: &'static str,
    },
    /// The rule collapsed `Vec`/`Mat` to a one-letter tag; re-case the
    /// dimension marker and fold integer constructors into the base name.
    NormalizeDimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenameRule {
    pub from: &'static str,
    pub to: &'static str,
    pub effect: RuleEffect,
}

impl RenameRule {
    const fn plain(from: &'static str, to: &'static str) -> Self {
        Self {
            from,
            to,
            effect: RuleEffect::None,
        }
    }

    const fn notice(
        from: &'static str,
        to: &'static str,
        kind: WarningKind,
        message: &'static str,
    ) -> Self {
        Self {
            from,
            to,
            effect: RuleEffect::Notice { kind, message },
        }
    }

    const fn dimension(from: &'static str, to: &'static str) -> Self {
        Self {
            from,
            to,
            effect: RuleEffect::NormalizeDimension,
        }
    }

    /// True when the replacement still contains the matched text
    /// (`Transpose` → `TransposeM4`). Such a rule must not fire on a name that
    /// already carries the replacement, or a second run would grow it again.
    pub fn expands(&self) -> bool {
        self.to.contains(self.from)
    }

    /// Whether the rule fires on the current working name.
    pub fn applies_to(&self, name: &str) -> bool {
        if !name.contains(self.from) {
            return false;
        }
        !(self.expands() && name.contains(self.to))
    }
}

pub const LINEAR_COMBINE_NOTICE: &str = "HMM_LinearCombineSSE is now HMM_LinearCombineV4M4, and will now use a fallback method when SSE is not available. You no longer need to check for the availability of SSE.";

pub const FAST_PRECISION_NOTICE: &str = "HMM_Fast* functions were removed in 2.0; this call now uses the full-precision function, which may be slower.";

/// Rules for `hmm_`-prefixed type identifiers.
pub static TYPE_RULES: &[RenameRule] = &[
    RenameRule::plain("hmm_", "HMM_"),
    RenameRule::plain("vec", "Vec"),
    RenameRule::plain("mat", "Mat"),
    RenameRule::plain("quaternion", "Quaternion"),
    RenameRule::plain("bool", "Bool"),
    RenameRule::plain(".InternalElementsSSE", ".SSE"),
];

/// Rules for `HMM_`-prefixed function identifiers.
pub static FUNCTION_RULES: &[RenameRule] = &[
    RenameRule::dimension("Vec", "V"),
    RenameRule::dimension("Mat", "M"),
    RenameRule::plain("Quaternion", "Q"),
    RenameRule::plain("Equals", "Eq"),
    RenameRule::plain("Subtract", "Sub"),
    RenameRule::plain("Multiply", "Mul"),
    RenameRule::plain("Divide", "Div"),
    RenameRule::plain("Inverse", "Inv"),
    RenameRule::plain("RSquareRoot", "InvSqrt"),
    RenameRule::plain("SquareRoot", "Sqrt"),
    RenameRule::plain("Squared", "Sqr"),
    RenameRule::plain("Length", "Len"),
    RenameRule::plain("Slerp", "SLerp"),
    RenameRule::plain("By", ""),
    RenameRule::notice(
        "LinearCombineSSE",
        "LinearCombineV4M4",
        WarningKind::FallbackNotice,
        LINEAR_COMBINE_NOTICE,
    ),
    RenameRule::plain("Transpose", "TransposeM4"),
    RenameRule::notice(
        "Fast",
        "",
        WarningKind::PrecisionNotice,
        FAST_PRECISION_NOTICE,
    ),
    RenameRule::plain("Normalize", "Norm"),
    RenameRule::plain("ToRadians", "ToRad"),
];

/// Functions whose 2.0 form names its coordinate-system convention.
pub const HANDED_FUNCTIONS: &[&str] = &[
    "Perspective",
    "Rotate",
    "Orthographic",
    "LookAt",
    "FromAxisAngle",
    "ToQuaternion",
];

/// Handed functions that additionally name their clip-space depth range.
pub const PROJECTION_FUNCTIONS: &[&str] = &["Perspective", "Orthographic"];

/// Any of these in a function name means it is already annotated.
pub const CONVENTION_MARKERS: &[&str] = &["RH", "LH", "NO", "ZO"];

pub const RIGHT_HANDED_SUFFIX: &str = "_RH";
pub const DEPTH_RANGE_SUFFIX: &str = "_NO";

/// Rewritten names of the calls whose first parameter moved from degrees to radians.
pub const DEGREE_CALLS: &[&str] = &["HMM_Perspective_RH_NO", "HMM_Rotate_RH"];

/// Wrapper that converts a degree argument into the 2.0 angle unit.
pub const ANGLE_CONVERSION: &str = "HMM_AngleDeg";

/// Names the type table produces that the function table would mangle.
pub const MIGRATED_TYPES: &[&str] = &[
    "HMM_Vec2",
    "HMM_Vec3",
    "HMM_Vec4",
    "HMM_Mat2",
    "HMM_Mat3",
    "HMM_Mat4",
    "HMM_Quaternion",
    "HMM_Bool",
];

pub fn is_projection(function: &str) -> bool {
    PROJECTION_FUNCTIONS.contains(&function)
}
