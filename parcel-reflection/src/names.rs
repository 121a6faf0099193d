// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub const NUMBER: &str = "java.lang.Number";
pub const ENUM: &str = "java.lang.Enum";
pub const COMPARABLE: &str = "java.lang.Comparable";
pub const SERIALIZABLE: &str = "java.io.Serializable";

pub const COLLECTION: &str = "java.util.Collection";
pub const LIST: &str = "java.util.List";
pub const ARRAY_LIST: &str = "java.util.ArrayList";
pub const RANDOM_ACCESS: &str = "java.util.RandomAccess";
pub const MAP: &str = "java.util.Map";
pub const HASH_MAP: &str = "java.util.HashMap";

pub const PARCELABLE: &str = "android.os.Parcelable";
pub const PARCELABLE_CREATOR: &str = "android.os.Parcelable.Creator";
pub const PARCEL: &str = "android.os.Parcel";
pub const BUNDLE: &str = "android.os.Bundle";
pub const PERSISTABLE_BUNDLE: &str = "android.os.PersistableBundle";
pub const IBINDER: &str = "android.os.IBinder";
pub const SIZE: &str = "android.util.Size";
pub const SIZE_F: &str = "android.util.SizeF";
pub const SPARSE_ARRAY: &str = "android.util.SparseArray";
pub const SPARSE_BOOLEAN_ARRAY: &str = "android.util.SparseBooleanArray";
pub const TEXT_UTILS: &str = "android.text.TextUtils";

pub const IMMUTABLE_COLLECTION: &str = "com.google.common.collect.ImmutableCollection";
pub const IMMUTABLE_LIST: &str = "com.google.common.collect.ImmutableList";
pub const IMMUTABLE_SET: &str = "com.google.common.collect.ImmutableSet";
pub const IMMUTABLE_MAP: &str = "com.google.common.collect.ImmutableMap";
