//! The capability the VM needs from a host: can it look a name up, write
//! its stringified value, and iterate it if it's a container. An explicit
//! cursor type the VM owns per active loop, rather than an ad-hoc
//! iterator-map-of-opaque-cursors.

/// Host-supplied mapping from identifier to value, used during render.
///
/// The VM never inspects a value's representation directly; it only asks
/// whether a name exists, asks for its stringified form, or asks for an
/// iterator over it. How values are stored and stringified is entirely up
/// to the implementation — Fae ships [`crate::value::Bindings`] as a
/// ready-to-use one, but any type implementing this trait works.
pub trait Binding {
    /// True iff `name` is bound. Does not need to account for active loop
    /// variables — the VM checks those separately before falling back here.
    fn exists(&self, name: &str) -> bool;

    /// Appends the stringified value of `name` to `out`. A no-op if `name`
    /// is unbound — missing bindings are never errors.
    fn emit(&self, name: &str, out: &mut String);

    /// Returns an iterator over the container bound to `name`, or `None`
    /// if `name` is unbound or not iterable.
    fn iterate(&self, name: &str) -> Option<Box<dyn Iterator<Item = crate::value::Value> + '_>>;
}
