pub(crate) const SAMPLE: &str = r#"module @sample attributes {cir.lang = #cir.lang<c>} {
  cir.global external @msg = #cir.const_array<"hi\"there\00" : !cir.array<!s8i x 10>> : !cir.array<!s8i x 10>
  cir.func dsolocal @main() -> !s32i extra(#fn_attr) {
    %0 = cir.alloca !s32i, !cir.ptr<!s32i>, ["__retval"] {alignment = 4 : i64}
    %1 = cir.const #cir.int<0> : !s32i // zero
    cir.store %1, %0 : !s32i, !cir.ptr<!s32i>
    %2 = cir.load %0 : !cir.ptr<!s32i>, !s32i
    cir.return %2 : !s32i
  } loc(#loc1)
}
"#;

pub(crate) fn sample_source() -> &'static str {
    SAMPLE
}
