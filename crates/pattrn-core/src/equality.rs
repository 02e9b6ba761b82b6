// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sequence comparison.

/// Element-wise equality of two sequences.
///
/// Nested sequences compare recursively through their own `PartialEq`.
pub fn sequences_equal<A, B>(a: &[A], b: &[B]) -> bool
where
    A: PartialEq<B>,
{
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}
