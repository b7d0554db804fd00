use serde::{Deserialize, Serialize};

macro_rules! define_id {
	($(#[$attr:meta])* $name:ident, $label:literal) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);

		impl $name {
			/// Returns the underlying row identity.
			#[inline]
			pub const fn get(self) -> u64 {
				self.0
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, concat!($label, "({})"), self.0)
			}
		}
	};
}

define_id!(
	/// Identity of a project row.
	ProjectId,
	"ProjectId"
);
define_id!(
	/// Identity of a persisted codebook.
	CodebookId,
	"CodebookId"
);
define_id!(
	/// Identity of a persisted codebook feature.
	FeatureId,
	"FeatureId"
);
