// Shims from inherent methods and std operators onto an operation surface.
// Each container invokes these once in its `ops` module.

/// Named non-mutating methods (`add`, `radd`, `div`, `eq`, ...)
macro_rules! flex_methods {
    ($container:ty { $($(#[$meta:meta])* $method:ident => $name:literal;)* }) => {
        impl $container {
            $(
                $(#[$meta])*
                pub fn $method<'a>(
                    &self,
                    other: impl Into<$crate::ops::Operand<'a>>,
                ) -> $crate::error::Result<$container> {
                    Self::ops().call($name, self, other.into())?.into_single()
                }
            )*
        }
    };
}

/// In-place methods (`iadd`, `iand`, ...) returning the receiver itself
macro_rules! inplace_methods {
    ($container:ty { $($method:ident => $name:literal;)* }) => {
        impl $container {
            $(
                /// In-place form; returns the receiver itself
                pub fn $method<'a>(
                    &mut self,
                    other: impl Into<$crate::ops::Operand<'a>>,
                ) -> $crate::error::Result<&mut $container> {
                    Self::ops().call_inplace($name, self, other.into())
                }
            )*
        }
    };
}

/// `std::ops` operators dispatching to the special methods
macro_rules! binary_operators {
    (@scalar $container:ty, $trait:ident, $method:ident, $special:literal, $reflected:literal, $ty:ty) => {
        impl<'a> std::ops::$trait<$ty> for &'a $container {
            type Output = $crate::error::Result<$container>;

            fn $method(self, rhs: $ty) -> Self::Output {
                <$container>::ops()
                    .call(
                        $special,
                        self,
                        $crate::ops::Operand::Scalar($crate::scalar::Scalar::from(rhs)),
                    )?
                    .into_single()
            }
        }

        // scalar on the left: the container is the right-hand operand
        impl<'a> std::ops::$trait<&'a $container> for $ty {
            type Output = $crate::error::Result<$container>;

            fn $method(self, rhs: &'a $container) -> Self::Output {
                <$container>::ops()
                    .call(
                        $reflected,
                        rhs,
                        $crate::ops::Operand::Scalar($crate::scalar::Scalar::from(self)),
                    )?
                    .into_single()
            }
        }
    };
    ($container:ty { $($trait:ident, $method:ident, $special:literal, $reflected:literal;)* }) => {
        $(
            impl<'a, 'b> std::ops::$trait<&'b $container> for &'a $container {
                type Output = $crate::error::Result<$container>;

                fn $method(self, rhs: &'b $container) -> Self::Output {
                    <$container>::ops()
                        .call($special, self, $crate::ops::Operand::from(rhs))?
                        .into_single()
                }
            }

            binary_operators!(@scalar $container, $trait, $method, $special, $reflected, $crate::scalar::Scalar);
            binary_operators!(@scalar $container, $trait, $method, $special, $reflected, i64);
            binary_operators!(@scalar $container, $trait, $method, $special, $reflected, f64);
        )*
    };
}
