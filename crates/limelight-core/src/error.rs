// Copyright 2025 the Limelight authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for display-list manipulation.

use std::fmt;

/// A contract violation while manipulating a child list.
///
/// These are caller errors, raised at the call site and propagated untouched:
/// the engine has no retry or recovery path for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayListError {
    /// The child is already attached to the stage or to a container; a node
    /// may appear in the tree at most once.
    AlreadyAttached {
        /// The object index of the offending child.
        index: u64,
    },
    /// The child is not present in this child list.
    ChildNotFound {
        /// The object index of the missing child.
        index: u64,
    },
}

impl fmt::Display for DisplayListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayListError::AlreadyAttached { index } => {
                write!(f, "display object #{index} is already attached to the tree")
            }
            DisplayListError::ChildNotFound { index } => {
                write!(f, "display object #{index} is not a child of this node")
            }
        }
    }
}

impl std::error::Error for DisplayListError {}
