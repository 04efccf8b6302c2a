use num_traits::{One, PrimInt};
use rapier3d::prelude::{Group, InteractionGroups, QueryFilter};

/// Trait implemented by layer enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) is the bit index. The backing integer
/// type is chosen through the associated `Storage`.
pub trait LayerFlag {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A set of collision layers.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayerMask<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> LayerMask<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Matches nothing. A probe filtered by an empty mask never hits.
    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn all() -> Self {
        Self {
            bits: T::max_value(),
        }
    }

    pub fn from_layers<U: LayerFlag<Storage = T> + Copy>(layers: &[U]) -> Self {
        let mut mask = Self::empty();
        mask.insert_many(layers);
        mask
    }

    pub fn insert<U: LayerFlag<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits | layer.mask();
    }

    pub fn remove<U: LayerFlag<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits & !layer.mask();
    }

    pub fn contains<U: LayerFlag<Storage = T>>(&self, layer: U) -> bool {
        (self.bits & layer.mask()) != T::zero()
    }

    pub fn insert_many<U: LayerFlag<Storage = T> + Copy>(&mut self, layers: &[U]) {
        for &layer in layers {
            self.insert(layer);
        }
    }

    pub fn intersects(&self, other: Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a layer enum and implement `LayerFlag` for it.
///
/// Example:
/// ```rust
/// locomotion::define_layers!(DemoLayer, u32, {
///     Floor,
///     Rubble,
/// });
/// ```
#[macro_export]
macro_rules! define_layers {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::layers::LayerFlag for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

define_layers!(GroundLayer, u32, {
    Terrain,
    Props,
    Creatures,
    Water,
});

/// Layer mask used by the ground probe. Backed by `u32` to line up with Rapier groups.
pub type GroundLayers = LayerMask<u32>;

impl GroundLayers {
    /// Rapier collision group equivalent of this mask.
    pub fn as_group(&self) -> Group {
        Group::from_bits_truncate(self.bits)
    }

    /// Scene-query filter that only accepts colliders whose memberships intersect this mask.
    pub fn query_filter(&self) -> QueryFilter<'static> {
        QueryFilter::new().groups(InteractionGroups::all().with_filter(self.as_group()))
    }
}
