/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fuzzing harnesses, shared by the `cargo fuzz` targets and by the tests
//! that replay the corpus.

pub mod nav_bits;
