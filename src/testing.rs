//! A recording stand-in for the WAFv2 API.

use std::{collections::VecDeque, sync::Mutex};

use aws_sdk_wafv2::types::error as exceptions;

use crate::{
    proxy::{with_operations, WafProxy},
    Error,
};

/// Remembers the inputs of one operation and answers with queued results.
pub(crate) struct Responder<I, O> {
    calls: Mutex<Vec<I>>,
    responses: Mutex<VecDeque<Result<O, Error>>>,
}

impl<I, O> Default for Responder<I, O> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }
}

impl<I: Clone, O> Responder<I, O> {
    pub(crate) fn returns(&self, output: O) {
        self.responses
            .lock()
            .expect("poisoned mutex")
            .push_back(Ok(output));
    }

    pub(crate) fn fails(&self, error: Error) {
        self.responses
            .lock()
            .expect("poisoned mutex")
            .push_back(Err(error));
    }

    pub(crate) fn calls(&self) -> Vec<I> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub(crate) fn only_call(&self) -> I {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call");
        calls.into_iter().next().expect("one call")
    }

    fn respond(&self, input: I) -> Result<O, Error> {
        self.calls.lock().expect("poisoned mutex").push(input);
        self.responses
            .lock()
            .expect("poisoned mutex")
            .pop_front()
            .expect("no response queued for this call")
    }
}

macro_rules! fake_proxy {
    ($($operation:ident: $input:ident -> $output:ident;)*) => {
        #[derive(Default)]
        pub(crate) struct FakeProxy {
            $(
                pub(crate) $operation: Responder<
                    aws_sdk_wafv2::operation::$operation::$input,
                    aws_sdk_wafv2::operation::$operation::$output,
                >,
            )*
        }

        impl WafProxy for FakeProxy {
            $(
                async fn $operation(
                    &self,
                    input: aws_sdk_wafv2::operation::$operation::$input,
                ) -> Result<aws_sdk_wafv2::operation::$operation::$output, Error> {
                    self.$operation.respond(input)
                }
            )*
        }
    };
}

with_operations!(fake_proxy);

pub(crate) fn nonexistent_item() -> Error {
    aws_sdk_wafv2::Error::WafNonexistentItemException(
        exceptions::WafNonexistentItemException::builder()
            .message("AWS WAF couldn't perform the operation because your resource doesn't exist.")
            .build(),
    )
    .into()
}

pub(crate) fn optimistic_lock() -> Error {
    aws_sdk_wafv2::Error::WafOptimisticLockException(
        exceptions::WafOptimisticLockException::builder()
            .message("AWS WAF couldn't save your changes because you tried to update or delete a resource that has changed since you last retrieved it.")
            .build(),
    )
    .into()
}
