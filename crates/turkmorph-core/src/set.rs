// Fixed-width enum sets.
//
// Phonetic attribute sets are the identity of suffix-form graph nodes, so a
// set must hash and compare as a single integer. `attribute_set!` declares a
// fieldless enum together with a `Copy` bitset over it.

macro_rules! attribute_set {
    (
        $(#[$emeta:meta])*
        pub enum $enum:ident;
        $(#[$smeta:meta])*
        pub struct $set:ident($bits:ty);
        {
            $( $(#[$vmeta:meta])* $variant:ident => $name:literal ),+ $(,)?
        }
    ) => {
        $(#[$emeta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum $enum {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $enum {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum] = &[$($enum::$variant),+];

            /// The single bit representing this variant.
            pub const fn bit(self) -> $bits {
                (1 as $bits) << (self as u8)
            }

            /// Textual name, as used in lexicon files and debug output.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $enum::$variant => $name ),+
                }
            }

            /// Parse a textual name produced by [`Self::name`].
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        $(#[$smeta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $set($bits);

        impl $set {
            const MASK: $bits = 0 $(| $enum::$variant.bit())+;

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn all() -> Self {
                Self(Self::MASK)
            }

            /// Build a set from a slice of members.
            pub const fn of(members: &[$enum]) -> Self {
                let mut bits = 0;
                let mut i = 0;
                while i < members.len() {
                    bits |= members[i].bit();
                    i += 1;
                }
                Self(bits)
            }

            /// Raw bit representation.
            pub const fn bits(self) -> $bits {
                self.0
            }

            /// Build a set from raw bits; unknown bits are dropped.
            pub const fn from_bits(bits: $bits) -> Self {
                Self(bits & Self::MASK)
            }

            pub const fn contains(self, member: $enum) -> bool {
                self.0 & member.bit() != 0
            }

            /// True if every member of `other` is in `self`.
            pub const fn contains_all(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True if `self` and `other` share at least one member.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn len(self) -> usize {
                self.0.count_ones() as usize
            }

            /// Copy of `self` with `member` added.
            pub const fn with(self, member: $enum) -> Self {
                Self(self.0 | member.bit())
            }

            /// Copy of `self` with `member` removed.
            pub const fn without(self, member: $enum) -> Self {
                Self(self.0 & !member.bit())
            }

            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            pub const fn intersection(self, other: Self) -> Self {
                Self(self.0 & other.0)
            }

            pub const fn difference(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }

            pub fn insert(&mut self, member: $enum) {
                self.0 |= member.bit();
            }

            pub fn remove(&mut self, member: $enum) {
                self.0 &= !member.bit();
            }

            /// Members in declaration order.
            pub fn iter(self) -> impl Iterator<Item = $enum> {
                $enum::ALL.iter().copied().filter(move |m| self.contains(*m))
            }
        }

        impl std::fmt::Debug for $set {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_set().entries(self.iter()).finish()
            }
        }

        impl From<$enum> for $set {
            fn from(member: $enum) -> Self {
                Self(member.bit())
            }
        }

        impl FromIterator<$enum> for $set {
            fn from_iter<T: IntoIterator<Item = $enum>>(iter: T) -> Self {
                let mut set = Self::empty();
                set.extend(iter);
                set
            }
        }

        impl Extend<$enum> for $set {
            fn extend<T: IntoIterator<Item = $enum>>(&mut self, iter: T) {
                for member in iter {
                    self.insert(member);
                }
            }
        }

        impl std::ops::BitOr for $set {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }
    };
}
