// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend setup.
//!
//! Only `SQLite` is supported. Backend-specific code is limited to opening
//! connections, running migrations, PRAGMA configuration, and reading the
//! last inserted rowid.

pub mod sqlite;
