// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod client_tests;
mod dashboard_tests;
mod site_tests;
mod team_tests;
mod ticket_tests;
