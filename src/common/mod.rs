macro_rules! id {
    ($t:ty) => {
        ::std::any::TypeId::of::<$t>()
    };
}

mod type_map;

pub(crate) use type_map::{TypeMap, Untyped};
