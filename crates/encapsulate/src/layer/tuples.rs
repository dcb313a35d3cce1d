// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use tower_layer::Layer;

use super::Stack;

impl<C> Stack for (C,) {
    type Callback = C;

    fn build(self) -> Self::Callback {
        self.0
    }
}

macro_rules! stack_tuple {
    ($outer:ident $(, $rest:ident)* ; $callback:ident) => {
        impl<$outer, $($rest,)* $callback> Stack for ($outer, $($rest,)* $callback)
        where
            ($($rest,)* $callback,): Stack,
            $outer: Layer<<($($rest,)* $callback,) as Stack>::Callback>,
        {
            type Callback = <$outer as Layer<<($($rest,)* $callback,) as Stack>::Callback>>::Service;

            #[expect(non_snake_case, reason = "bindings reuse the type parameter names")]
            fn build(self) -> Self::Callback {
                let ($outer, $($rest,)* $callback) = self;

                $outer.layer(($($rest,)* $callback,).build())
            }
        }
    };
}

stack_tuple!(L1; C);
stack_tuple!(L1, L2; C);
stack_tuple!(L1, L2, L3; C);
stack_tuple!(L1, L2, L3, L4; C);
stack_tuple!(L1, L2, L3, L4, L5; C);
stack_tuple!(L1, L2, L3, L4, L5, L6; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7, L8; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7, L8, L9; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7, L8, L9, L10; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7, L8, L9, L10, L11; C);
stack_tuple!(L1, L2, L3, L4, L5, L6, L7, L8, L9, L10, L11, L12; C);
