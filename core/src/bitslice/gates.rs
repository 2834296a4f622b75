//! Bit-sliced gate networks: the Rijndael S-box, `RotateRows`, and
//! `MixColumns`, all generic over [`Lane`] so the portable and AVX2 backends
//! share one transcription of the circuit.

use super::lane::Lane;

/// Eight lane-vectors representing one byte, indexed MSB-first (`bits[0]` is
/// the most significant bit).
pub type EightBits<L> = [L; 8];

/// Three [`EightBits`] groups representing a 24-bit HALFLOOP state.
#[derive(Clone, Copy)]
pub struct TwentyFourBits<L: Lane> {
    pub msb: EightBits<L>,
    pub mid: EightBits<L>,
    pub lsb: EightBits<L>,
}

/// Gate-network implementation of the Rijndael S-box.
/// <https://cs-www.cs.yale.edu/homes/peralta/CircuitStuff/SLP_AES_113.txt>
pub fn sub_bytes_bitsliced<L: Lane>(input: EightBits<L>) -> EightBits<L> {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = input;

    let y14 = b3.xor(b5);
    let y13 = b0.xor(b6);
    let y9 = b0.xor(b3);
    let y8 = b0.xor(b5);
    let t0 = b1.xor(b2);
    let y1 = t0.xor(b7);
    let y4 = y1.xor(b3);
    let y12 = y13.xor(y14);
    let y2 = y1.xor(b0);
    let y5 = y1.xor(b6);
    let y3 = y5.xor(y8);
    let t1 = b4.xor(y12);
    let y15 = t1.xor(b5);
    let y20 = t1.xor(b1);
    let y6 = y15.xor(b7);
    let y10 = y15.xor(t0);
    let y11 = y20.xor(y9);
    let y7 = b7.xor(y11);
    let y17 = y10.xor(y11);
    let y19 = y10.xor(y8);
    let y16 = t0.xor(y11);
    let y21 = y13.xor(y16);
    let y18 = b0.xor(y16);
    let t2 = y12.and(y15);
    let t3 = y3.and(y6);
    let t4 = t3.xor(t2);
    let t5 = y4.and(b7);
    let t6 = t5.xor(t2);
    let t7 = y13.and(y16);
    let t8 = y5.and(y1);
    let t9 = t8.xor(t7);
    let t10 = y2.and(y7);
    let t11 = t10.xor(t7);
    let t12 = y9.and(y11);
    let t13 = y14.and(y17);
    let t14 = t13.xor(t12);
    let t15 = y8.and(y10);
    let t16 = t15.xor(t12);
    let t17 = t4.xor(y20);
    let t18 = t6.xor(t16);
    let t19 = t9.xor(t14);
    let t20 = t11.xor(t16);
    let t21 = t17.xor(t14);
    let t22 = t18.xor(y19);
    let t23 = t19.xor(y21);
    let t24 = t20.xor(y18);
    let t25 = t21.xor(t22);
    let t26 = t21.and(t23);
    let t27 = t24.xor(t26);
    let t28 = t25.and(t27);
    let t29 = t28.xor(t22);
    let t30 = t23.xor(t24);
    let t31 = t22.xor(t26);
    let t32 = t31.and(t30);
    let t33 = t32.xor(t24);
    let t34 = t23.xor(t33);
    let t35 = t27.xor(t33);
    let t36 = t24.and(t35);
    let t37 = t36.xor(t34);
    let t38 = t27.xor(t36);
    let t39 = t29.and(t38);
    let t40 = t25.xor(t39);
    let t41 = t40.xor(t37);
    let t42 = t29.xor(t33);
    let t43 = t29.xor(t40);
    let t44 = t33.xor(t37);
    let t45 = t42.xor(t41);
    let z0 = t44.and(y15);
    let z1 = t37.and(y6);
    let z2 = t33.and(b7);
    let z3 = t43.and(y16);
    let z4 = t40.and(y1);
    let z5 = t29.and(y7);
    let z6 = t42.and(y11);
    let z7 = t45.and(y17);
    let z8 = t41.and(y10);
    let z9 = t44.and(y12);
    let z10 = t37.and(y3);
    let z11 = t33.and(y4);
    let z12 = t43.and(y13);
    let z13 = t40.and(y5);
    let z14 = t29.and(y2);
    let z15 = t42.and(y9);
    let z16 = t45.and(y14);
    let z17 = t41.and(y8);
    let tc1 = z15.xor(z16);
    let tc2 = z10.xor(tc1);
    let tc3 = z9.xor(tc2);
    let tc4 = z0.xor(z2);
    let tc5 = z1.xor(z0);
    let tc6 = z3.xor(z4);
    let tc7 = z12.xor(tc4);
    let tc8 = z7.xor(tc6);
    let tc9 = z8.xor(tc7);
    let tc10 = tc8.xor(tc9);
    let tc11 = tc6.xor(tc5);
    let tc12 = z3.xor(z5);
    let tc13 = z13.xor(tc1);
    let tc14 = tc4.xor(tc12);

    let out_b3 = tc3.xor(tc11);
    let tc16 = z6.xor(tc8);
    let tc17 = z14.xor(tc10);
    let tc18 = tc13.xor(tc14);
    let out_b7 = z12.xor(tc18).not();
    let tc20 = z15.xor(tc16);
    let tc21 = tc2.xor(z11);
    let out_b0 = tc3.xor(tc16);
    let out_b6 = tc10.xor(tc18).not();
    let out_b4 = tc14.xor(out_b3);
    let out_b1 = out_b3.xor(tc16).not();
    let tc26 = tc17.xor(tc20);
    let out_b2 = tc26.xor(z17).not();
    let out_b5 = tc21.xor(tc17);

    [
        out_b0, out_b1, out_b2, out_b3, out_b4, out_b5, out_b6, out_b7,
    ]
}

/// Rotates the byte right by six bit positions.
pub fn rotate_rows_6<L: Lane>(input: EightBits<L>) -> EightBits<L> {
    [
        input[6], input[7], input[0], input[1], input[2], input[3], input[4], input[5],
    ]
}

/// Rotates the byte right by four bit positions.
pub fn rotate_rows_4<L: Lane>(input: EightBits<L>) -> EightBits<L> {
    [
        input[4], input[5], input[6], input[7], input[0], input[1], input[2], input[3],
    ]
}

/// Bit-sliced HALFLOOP-24 `MixColumns`.
pub fn mix_columns_bitsliced<L: Lane>(input: TwentyFourBits<L>) -> TwentyFourBits<L> {
    let (msb, mid, lsb) = (input.msb, input.mid, input.lsb);
    let lsb_out = [
        lsb[3].xor(lsb[0]).xor(mid[1]).xor(msb[0]),
        lsb[4].xor(lsb[1]).xor(lsb[0]).xor(mid[2]).xor(msb[1]),
        lsb[5].xor(lsb[2]).xor(lsb[1]).xor(lsb[0]).xor(mid[3]).xor(msb[2]),
        lsb[6].xor(lsb[3]).xor(lsb[2]).xor(lsb[1]).xor(mid[4]).xor(mid[0]).xor(msb[3]),
        lsb[7].xor(lsb[4]).xor(lsb[2]).xor(lsb[0]).xor(mid[5]).xor(mid[0]).xor(msb[4]),
        lsb[5].xor(lsb[1]).xor(lsb[0]).xor(mid[6]).xor(msb[5]),
        lsb[6].xor(lsb[2]).xor(lsb[1]).xor(mid[7]).xor(mid[0]).xor(msb[6]),
        lsb[7].xor(lsb[2]).xor(mid[0]).xor(msb[7]),
    ];
    let mid_out = [
        lsb[0].xor(mid[3]).xor(mid[0]).xor(msb[1]),
        lsb[1].xor(mid[4]).xor(mid[1]).xor(mid[0]).xor(msb[2]),
        lsb[2].xor(mid[5]).xor(mid[2]).xor(mid[1]).xor(mid[0]).xor(msb[3]),
        lsb[3].xor(mid[6]).xor(mid[3]).xor(mid[2]).xor(mid[1]).xor(msb[4]).xor(msb[0]),
        lsb[4].xor(mid[7]).xor(mid[4]).xor(mid[2]).xor(mid[0]).xor(msb[5]).xor(msb[0]),
        lsb[5].xor(mid[5]).xor(mid[1]).xor(mid[0]).xor(msb[6]),
        lsb[6].xor(mid[6]).xor(mid[2]).xor(mid[1]).xor(msb[7]).xor(msb[0]),
        lsb[7].xor(mid[7]).xor(mid[2]).xor(msb[0]),
    ];
    let msb_out = [
        lsb[1].xor(mid[0]).xor(msb[3]).xor(msb[0]),
        lsb[2].xor(mid[1]).xor(msb[4]).xor(msb[1]).xor(msb[0]),
        lsb[3].xor(mid[2]).xor(msb[5]).xor(msb[2]).xor(msb[1]).xor(msb[0]),
        lsb[4].xor(lsb[0]).xor(mid[3]).xor(msb[6]).xor(msb[3]).xor(msb[2]).xor(msb[1]),
        lsb[5].xor(lsb[0]).xor(mid[4]).xor(msb[7]).xor(msb[4]).xor(msb[2]).xor(msb[0]),
        lsb[6].xor(mid[5]).xor(msb[5]).xor(msb[1]).xor(msb[0]),
        lsb[7].xor(lsb[0]).xor(mid[6]).xor(msb[6]).xor(msb[2]).xor(msb[1]),
        lsb[0].xor(mid[7]).xor(msb[7]).xor(msb[2]),
    ];

    TwentyFourBits {
        msb: msb_out,
        mid: mid_out,
        lsb: lsb_out,
    }
}
