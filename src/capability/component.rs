use crate::capability::identity::Capability;
use crate::capability::set::CapabilitySet;
use std::any::Any;
use std::sync::Arc;

/// Binds a capability to the trait object that represents it.
///
/// Implemented by zero-sized marker types (see [`crate::interfaces`]). The
/// resolver is generic over `Interface` so callers get back a typed
/// `Arc<I::View>` instead of an untyped handle.
pub trait Interface: 'static {
    /// Trait object handed to callers, e.g. `dyn Size`.
    type View: ?Sized + Send + Sync + 'static;

    fn capability() -> Capability;
}

/// An object that declares the capabilities it provides.
///
/// Prefer the [`implements!`](crate::implements) macro over writing this by
/// hand; it keeps `provided` and `cast` in agreement.
pub trait Component: Any + Send + Sync {
    /// Capabilities this type provides natively.
    fn provided(&self) -> CapabilitySet;

    /// Hand `self` out as the view for `capability`.
    ///
    /// Returns `None` for capabilities the type does not provide.
    fn cast(self: Arc<Self>, capability: Capability) -> Option<ErasedView>;
}

impl dyn Component {
    /// Whether the object natively provides `capability` (exact match only).
    pub fn provides(&self, capability: Capability) -> bool {
        self.provided().contains(capability)
    }
}

/// Type-erased `Arc<I::View>` travelling out of [`Component::cast`].
pub struct ErasedView(Box<dyn Any + Send + Sync>);

impl ErasedView {
    pub fn new<I: Interface>(view: Arc<I::View>) -> Self {
        Self(Box::new(view))
    }

    /// Recover the typed view; `None` when it was erased for another interface.
    pub fn downcast<I: Interface>(self) -> Option<Arc<I::View>> {
        self.0.downcast::<Arc<I::View>>().ok().map(|view| *view)
    }
}

/// Share `value` as a component handle.
pub fn component<T: Component>(value: T) -> Arc<dyn Component> {
    Arc::new(value)
}

/// The object's own view for `I`, if it provides `I` natively.
///
/// The returned `Arc` points at the same allocation as `object`.
pub fn direct_view<I: Interface>(object: &Arc<dyn Component>) -> Option<Arc<I::View>> {
    let capability = I::capability();
    if !object.provides(capability) {
        return None;
    }
    Arc::clone(object).cast(capability)?.downcast::<I>()
}

/// Declare which interfaces a type provides.
///
/// ```ignore
/// implements!(FileObject => FileCapability);
/// ```
///
/// Expands to a [`Component`] impl whose `cast` coerces `Arc<Self>` into each
/// interface's view, so the type must implement every listed view trait.
#[macro_export]
macro_rules! implements {
    ($ty:ty => $($iface:ty),+ $(,)?) => {
        impl $crate::Component for $ty {
            fn provided(&self) -> $crate::CapabilitySet {
                [$(<$iface as $crate::Interface>::capability()),+]
                    .into_iter()
                    .collect()
            }

            fn cast(
                self: ::std::sync::Arc<Self>,
                capability: $crate::Capability,
            ) -> ::std::option::Option<$crate::ErasedView> {
                $(
                    if capability == <$iface as $crate::Interface>::capability() {
                        let view: ::std::sync::Arc<<$iface as $crate::Interface>::View> = self;
                        return ::std::option::Option::Some($crate::ErasedView::new::<$iface>(view));
                    }
                )+
                ::std::option::Option::None
            }
        }
    };
}
